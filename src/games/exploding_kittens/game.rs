//! Exploding Kittens setup and state mutations.

use crate::core::{
    CategoryConfig, CategoryId, CollectionConfig, CollectionId, EntityId, GameConfig, GameState, ObservabilityRule,
    PlayerId, ReturnTo, StateError, ValueDistribution,
};
use crate::games::TabletopGame;

pub const CARD: CategoryId = CategoryId::new(0);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KittenCard {
    ExplodingKitten,
    Defuse,
    Nope,
    Attack,
    Skip,
    Favor,
    Shuffle,
    SeeTheFuture,
    TacoCat,
    MelonCat,
    BeardCat,
    RainbowCat,
    FurryCat,
}

impl KittenCard {
    pub const ALL: [KittenCard; 13] = [
        KittenCard::ExplodingKitten,
        KittenCard::Defuse,
        KittenCard::Nope,
        KittenCard::Attack,
        KittenCard::Skip,
        KittenCard::Favor,
        KittenCard::Shuffle,
        KittenCard::SeeTheFuture,
        KittenCard::TacoCat,
        KittenCard::MelonCat,
        KittenCard::BeardCat,
        KittenCard::RainbowCat,
        KittenCard::FurryCat,
    ];

    #[must_use]
    pub const fn value(self) -> i64 {
        self as i64
    }

    #[must_use]
    pub fn from_value(value: i64) -> Option<Self> {
        Self::ALL.get(usize::try_from(value).ok()?).copied()
    }

    /// Copies shuffled into the pile before hands are dealt. Kittens and
    /// defuses depend on the player count and are handled separately.
    const fn base_copies(self) -> usize {
        match self {
            KittenCard::ExplodingKitten | KittenCard::Defuse => 0,
            KittenCard::Nope | KittenCard::SeeTheFuture => 5,
            _ => 4,
        }
    }
}

/// A configured Exploding Kittens game.
#[derive(Clone, Debug)]
pub struct ExplodingKittens {
    config: GameConfig,
    hands: Vec<CollectionId>,
    draw_pile: CollectionId,
    discard: CollectionId,
}

/// Builder for creating an Exploding Kittens game.
pub struct ExplodingKittensBuilder {
    player_count: usize,
    hand_size: usize,
    defuse_count: usize,
}

impl Default for ExplodingKittensBuilder {
    fn default() -> Self {
        Self {
            player_count: 4,
            hand_size: 7,
            defuse_count: 6,
        }
    }
}

impl ExplodingKittensBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_count(mut self, count: usize) -> Self {
        assert!((2..=5).contains(&count), "Player count must be 2-5");
        self.player_count = count;
        self
    }

    /// Cards dealt on top of each player's defuse.
    pub fn hand_size(mut self, size: usize) -> Self {
        assert!(size <= 8, "Hand size must be at most 8");
        self.hand_size = size;
        self
    }

    /// Build the game and initial state.
    pub fn build(self, seed: u64) -> Result<(ExplodingKittens, GameState), StateError> {
        let hands: Vec<CollectionId> = (0..self.player_count as u16).map(CollectionId::new).collect();
        let draw_pile = CollectionId::new(self.player_count as u16);
        let discard = CollectionId::new(self.player_count as u16 + 1);

        let mut config = GameConfig::new(self.player_count).with_category(CategoryConfig::new(
            CARD,
            "Card",
            ValueDistribution::uniform(KittenCard::ALL.iter().map(|c| c.value())),
        ));
        for (player, &hand) in PlayerId::all(self.player_count).zip(&hands) {
            config = config.with_collection(
                CollectionConfig::new(hand, format!("{} Hand", player))
                    .with_owner(player)
                    .hidden_with_pool(draw_pile),
            );
        }
        config = config
            .with_collection(CollectionConfig::new(draw_pile, "Draw Pile").with_rule(ObservabilityRule::PerItem {
                return_to: ReturnTo::HiddenSlots,
            }))
            .with_collection(CollectionConfig::new(discard, "Discard Pile"));

        let mut state = GameState::new(&config, seed);

        for card in KittenCard::ALL {
            for _ in 0..card.base_copies() {
                let entity = state.spawn(CARD, card.value(), None);
                state.observable_mut(draw_pile)?.add_visible_to(entity, None).map_err(StateError::deck(draw_pile))?;
            }
        }
        state.shuffle(draw_pile)?;

        for &hand in &hands {
            let defuse = state.spawn(CARD, KittenCard::Defuse.value(), None);
            state.add_to(hand, defuse)?;
            for _ in 0..self.hand_size {
                let card = state.draw(draw_pile)?;
                state.add_to(hand, card)?;
            }
        }

        let kittens = self.player_count - 1;
        let spare_defuses = self.defuse_count.saturating_sub(self.player_count);
        for _ in 0..kittens {
            let kitten = state.spawn(CARD, KittenCard::ExplodingKitten.value(), None);
            state.observable_mut(draw_pile)?.add_visible_to(kitten, None).map_err(StateError::deck(draw_pile))?;
        }
        for _ in 0..spare_defuses {
            let defuse = state.spawn(CARD, KittenCard::Defuse.value(), None);
            state.observable_mut(draw_pile)?.add_visible_to(defuse, None).map_err(StateError::deck(draw_pile))?;
        }
        state.shuffle(draw_pile)?;

        let game = ExplodingKittens {
            config,
            hands,
            draw_pile,
            discard,
        };

        Ok((game, state))
    }
}

impl ExplodingKittens {
    pub fn hand(&self, player: PlayerId) -> Result<CollectionId, StateError> {
        self.hands.get(player.index()).copied().ok_or(StateError::PlayerOutOfRange {
            player,
            player_count: self.hands.len(),
        })
    }

    pub fn draw_pile(&self) -> CollectionId {
        self.draw_pile
    }

    pub fn discard(&self) -> CollectionId {
        self.discard
    }

    /// Draw the top card of the pile into a hand.
    pub fn draw_card(&self, state: &mut GameState, player: PlayerId) -> Result<EntityId, StateError> {
        let hand = self.hand(player)?;
        let card = state.draw(self.draw_pile)?;
        let id = card.id;
        state.add_to(hand, card)?;
        Ok(id)
    }

    /// Play a card from hand onto the discard pile.
    pub fn play_card(&self, state: &mut GameState, player: PlayerId, card: EntityId) -> Result<(), StateError> {
        state.move_entity(self.hand(player)?, self.discard, card)
    }

    /// Hand a card to another player (Favor).
    pub fn give_card(
        &self,
        state: &mut GameState,
        giver: PlayerId,
        receiver: PlayerId,
        card: EntityId,
    ) -> Result<(), StateError> {
        state.move_entity(self.hand(giver)?, self.hand(receiver)?, card)
    }

    /// Put a defused kitten back into the pile at `index`, where only the
    /// placing player knows it is.
    pub fn place_exploding_kitten(
        &self,
        state: &mut GameState,
        player: PlayerId,
        card: EntityId,
        index: usize,
    ) -> Result<(), StateError> {
        let kitten = state.take(self.hand(player)?, card)?;
        state
            .observable_mut(self.draw_pile)?
            .add_at_visible_to(kitten, index, Some(player))
            .map_err(StateError::deck(self.draw_pile))
    }

    /// Show the top `count` cards of the pile to a player.
    pub fn see_the_future(&self, state: &mut GameState, player: PlayerId, count: usize) -> Result<(), StateError> {
        let pile = state.observable_mut(self.draw_pile)?;
        for index in 0..count.min(pile.size()) {
            pile.set_visibility(index, player, true).map_err(StateError::deck(self.draw_pile))?;
        }
        Ok(())
    }
}

impl TabletopGame for ExplodingKittens {
    fn name(&self) -> &'static str {
        "Exploding Kittens"
    }

    fn config(&self) -> &GameConfig {
        &self.config
    }
}
