//! Virus setup and state mutations.

use crate::core::{
    CategoryConfig, CategoryId, CollectionConfig, CollectionId, EntityId, GameConfig, GameState, PlayerId,
    StateError, ValueDistribution,
};
use crate::games::TabletopGame;

pub const CARD: CategoryId = CategoryId::new(0);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VirusKind {
    Organ,
    Virus,
    Medicine,
    Treatment,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VirusColor {
    Red,
    Green,
    Blue,
    Yellow,
    Wild,
}

/// A card: kind and color, packed into the entity value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VirusCard {
    pub kind: VirusKind,
    pub color: VirusColor,
}

impl VirusCard {
    const KINDS: [VirusKind; 4] = [VirusKind::Organ, VirusKind::Virus, VirusKind::Medicine, VirusKind::Treatment];
    const COLORS: [VirusColor; 5] = [
        VirusColor::Red,
        VirusColor::Green,
        VirusColor::Blue,
        VirusColor::Yellow,
        VirusColor::Wild,
    ];

    #[must_use]
    pub const fn new(kind: VirusKind, color: VirusColor) -> Self {
        Self { kind, color }
    }

    #[must_use]
    pub const fn value(self) -> i64 {
        self.kind as i64 * 8 + self.color as i64
    }

    #[must_use]
    pub fn from_value(value: i64) -> Option<Self> {
        let kind = *Self::KINDS.get(usize::try_from(value / 8).ok()?)?;
        let color = *Self::COLORS.get(usize::try_from(value % 8).ok()?)?;
        Some(Self { kind, color })
    }

    /// Full deck composition as `(card, copies)`.
    fn deck() -> Vec<(VirusCard, u32)> {
        let mut deck = Vec::new();
        for color in &Self::COLORS[..4] {
            deck.push((Self::new(VirusKind::Organ, *color), 5));
            deck.push((Self::new(VirusKind::Virus, *color), 4));
            deck.push((Self::new(VirusKind::Medicine, *color), 4));
        }
        deck.push((Self::new(VirusKind::Organ, VirusColor::Wild), 1));
        deck.push((Self::new(VirusKind::Virus, VirusColor::Wild), 1));
        deck.push((Self::new(VirusKind::Medicine, VirusColor::Wild), 4));
        deck.push((Self::new(VirusKind::Treatment, VirusColor::Wild), 10));
        deck
    }
}

/// A configured Virus game.
#[derive(Clone, Debug)]
pub struct Virus {
    config: GameConfig,
    hands: Vec<CollectionId>,
    bodies: Vec<CollectionId>,
    draw_pile: CollectionId,
    discard: CollectionId,
}

/// Builder for creating a Virus game.
pub struct VirusBuilder {
    player_count: usize,
    hand_size: usize,
}

impl Default for VirusBuilder {
    fn default() -> Self {
        Self {
            player_count: 2,
            hand_size: 3,
        }
    }
}

impl VirusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_count(mut self, count: usize) -> Self {
        assert!((2..=6).contains(&count), "Player count must be 2-6");
        self.player_count = count;
        self
    }

    pub fn hand_size(mut self, size: usize) -> Self {
        assert!(size <= 10, "Hand size must be at most 10");
        self.hand_size = size;
        self
    }

    /// Build the game and initial state.
    pub fn build(self, seed: u64) -> Result<(Virus, GameState), StateError> {
        let n = self.player_count as u16;
        let hands: Vec<CollectionId> = (0..n).map(CollectionId::new).collect();
        let bodies: Vec<CollectionId> = (n..2 * n).map(CollectionId::new).collect();
        let draw_pile = CollectionId::new(2 * n);
        let discard = CollectionId::new(2 * n + 1);

        let distribution = VirusCard::deck()
            .into_iter()
            .fold(ValueDistribution::new(), |d, (card, copies)| d.with_value(card.value(), copies));
        let mut config = GameConfig::new(self.player_count).with_category(CategoryConfig::new(CARD, "Card", distribution));
        for (player, (&hand, &body)) in PlayerId::all(self.player_count).zip(hands.iter().zip(&bodies)) {
            config = config
                .with_collection(
                    CollectionConfig::new(hand, format!("{} Hand", player))
                        .with_owner(player)
                        .hidden_with_pool(draw_pile),
                )
                .with_collection(CollectionConfig::new(body, format!("{} Body", player)).with_owner(player));
        }
        config = config
            .with_collection(CollectionConfig::new(draw_pile, "Draw Pile").hidden())
            .with_collection(CollectionConfig::new(discard, "Discard Pile"));

        let mut state = GameState::new(&config, seed);
        for (card, copies) in VirusCard::deck() {
            for _ in 0..copies {
                let entity = state.spawn(CARD, card.value(), None);
                state.add_to(draw_pile, entity)?;
            }
        }
        state.shuffle(draw_pile)?;

        for &hand in &hands {
            for _ in 0..self.hand_size {
                let card = state.draw(draw_pile)?;
                state.add_to(hand, card)?;
            }
        }

        let game = Virus {
            config,
            hands,
            bodies,
            draw_pile,
            discard,
        };

        Ok((game, state))
    }
}

impl Virus {
    pub fn hand(&self, player: PlayerId) -> Result<CollectionId, StateError> {
        self.seat(&self.hands, player)
    }

    pub fn body(&self, player: PlayerId) -> Result<CollectionId, StateError> {
        self.seat(&self.bodies, player)
    }

    fn seat(&self, collections: &[CollectionId], player: PlayerId) -> Result<CollectionId, StateError> {
        collections.get(player.index()).copied().ok_or(StateError::PlayerOutOfRange {
            player,
            player_count: collections.len(),
        })
    }

    pub fn draw_pile(&self) -> CollectionId {
        self.draw_pile
    }

    pub fn discard(&self) -> CollectionId {
        self.discard
    }

    /// Play a card from hand onto a body (own organ, or a virus or
    /// medicine onto any body).
    pub fn play_to_body(
        &self,
        state: &mut GameState,
        player: PlayerId,
        target: PlayerId,
        card: EntityId,
    ) -> Result<(), StateError> {
        state.move_entity(self.hand(player)?, self.body(target)?, card)
    }

    /// Discard `cards` from a hand and draw as many replacements.
    ///
    /// An empty draw pile is refilled from the shuffled discard pile.
    pub fn replace_cards(&self, state: &mut GameState, player: PlayerId, cards: &[EntityId]) -> Result<(), StateError> {
        let hand = self.hand(player)?;
        for &card in cards {
            state.move_entity(hand, self.discard, card)?;
        }
        for _ in cards {
            if state.size(self.draw_pile) == 0 {
                self.refill_draw_pile(state)?;
            }
            let card = state.draw(self.draw_pile)?;
            state.add_to(hand, card)?;
        }
        Ok(())
    }

    fn refill_draw_pile(&self, state: &mut GameState) -> Result<(), StateError> {
        while state.size(self.discard) > 0 {
            let card = state.draw(self.discard)?;
            state.add_to(self.draw_pile, card)?;
        }
        state.shuffle(self.draw_pile)?;
        tracing::debug!(cards = state.size(self.draw_pile), "refilled draw pile from discard");
        Ok(())
    }
}

impl TabletopGame for Virus {
    fn name(&self) -> &'static str {
        "Virus"
    }

    fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(state: &GameState, collection: CollectionId) -> Vec<EntityId> {
        state.deck(collection).unwrap().iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_game_creation() {
        let (game, state) = VirusBuilder::new().player_count(4).build(42).unwrap();
        assert!(game.config().validate().is_ok());

        for player in PlayerId::all(4) {
            assert_eq!(state.size(game.hand(player).unwrap()), 3);
            assert_eq!(state.size(game.body(player).unwrap()), 0);
        }
        assert_eq!(state.size(game.draw_pile()), 68 - 12);
    }

    #[test]
    fn test_card_values() {
        let card = VirusCard::new(VirusKind::Medicine, VirusColor::Yellow);
        assert_eq!(VirusCard::from_value(card.value()), Some(card));
        assert_eq!(VirusCard::from_value(-1), None);
        assert_eq!(VirusCard::from_value(7), None);
    }

    #[test]
    fn test_replace_cards() {
        let (game, mut state) = VirusBuilder::new().build(3).unwrap();
        let p0 = PlayerId::new(0);
        let old = ids(&state, game.hand(p0).unwrap());

        game.replace_cards(&mut state, p0, &old[..2]).unwrap();
        let new = ids(&state, game.hand(p0).unwrap());
        assert_eq!(new.len(), 3);
        assert!(new.contains(&old[2]));
        assert!(!new.contains(&old[0]));
        assert_eq!(state.size(game.discard()), 2);
    }

    #[test]
    fn test_replace_refills_from_discard() {
        let (game, mut state) = VirusBuilder::new().build(3).unwrap();
        let p0 = PlayerId::new(0);

        // Empty the pile into the discard.
        while state.size(game.draw_pile()) > 0 {
            let card = state.draw(game.draw_pile()).unwrap();
            state.add_to(game.discard(), card).unwrap();
        }
        let discarded = state.size(game.discard());
        let hand = ids(&state, game.hand(p0).unwrap());

        game.replace_cards(&mut state, p0, &hand).unwrap();
        assert_eq!(state.size(game.hand(p0).unwrap()), 3);
        assert_eq!(state.size(game.discard()), 0);
        assert_eq!(state.size(game.draw_pile()), discarded);
    }

    #[test]
    fn test_play_to_body() {
        let (game, mut state) = VirusBuilder::new().build(3).unwrap();
        let (p0, p1) = (PlayerId::new(0), PlayerId::new(1));
        let card = ids(&state, game.hand(p0).unwrap())[0];

        game.play_to_body(&mut state, p0, p1, card).unwrap();
        assert_eq!(state.find(card).map(|(c, _)| c), Some(game.body(p1).unwrap()));
    }

    #[test]
    fn test_unseated_player_is_an_error() {
        let (game, mut state) = VirusBuilder::new().build(3).unwrap();
        let stranger = PlayerId::new(2);
        assert!(matches!(game.hand(stranger), Err(StateError::PlayerOutOfRange { .. })));
        assert!(game.body(stranger).is_err());

        let card = ids(&state, game.hand(PlayerId::new(0)).unwrap())[0];
        assert!(game.play_to_body(&mut state, PlayerId::new(0), stranger, card).is_err());
        assert_eq!(state.size(game.hand(PlayerId::new(0)).unwrap()), 3);
    }
}
