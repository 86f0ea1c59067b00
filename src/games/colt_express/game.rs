//! Colt Express setup and state mutations.

use crate::core::{
    CategoryConfig, CategoryId, CollectionConfig, CollectionId, EntityId, GameConfig, GameState, ObservabilityRule,
    PlayerId, PlayerMap, ReturnTo, StateError, ValueDistribution,
};
use crate::games::TabletopGame;
use crate::redaction::sample_value;

pub const ACTION_CARD: CategoryId = CategoryId::new(0);
pub const PURSE: CategoryId = CategoryId::new(1);
pub const JEWEL: CategoryId = CategoryId::new(2);
pub const STRONGBOX: CategoryId = CategoryId::new(3);
pub const ROUND_CARD: CategoryId = CategoryId::new(4);
pub const END_ROUND_CARD: CategoryId = CategoryId::new(5);

/// Counter keys in `PublicState`.
pub const BULLETS: &str = "bullets";
pub const CHARACTER: &str = "character";

/// Action card kinds. Stored as the entity value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CardKind {
    MoveSideways,
    MoveUp,
    MoveMarshal,
    Shoot,
    Punch,
    CollectMoney,
    Bullet,
}

impl CardKind {
    pub const ALL: [CardKind; 7] = [
        CardKind::MoveSideways,
        CardKind::MoveUp,
        CardKind::MoveMarshal,
        CardKind::Shoot,
        CardKind::Punch,
        CardKind::CollectMoney,
        CardKind::Bullet,
    ];

    #[must_use]
    pub const fn value(self) -> i64 {
        self as i64
    }

    #[must_use]
    pub fn from_value(value: i64) -> Option<Self> {
        Self::ALL.get(usize::try_from(value).ok()?).copied()
    }

    /// Copies in each bandit's starting deck.
    const fn starting_copies(self) -> u32 {
        match self {
            CardKind::MoveSideways | CardKind::MoveUp | CardKind::Shoot | CardKind::CollectMoney => 2,
            CardKind::MoveMarshal | CardKind::Punch => 1,
            CardKind::Bullet => 0,
        }
    }

    fn distribution() -> ValueDistribution {
        Self::ALL
            .iter()
            .filter(|k| k.starting_copies() > 0)
            .fold(ValueDistribution::new(), |d, k| d.with_value(k.value(), k.starting_copies()))
    }
}

/// Loot types. The type is public, the value is not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LootKind {
    Purse,
    Jewel,
    Strongbox,
}

impl LootKind {
    #[must_use]
    pub const fn category(self) -> CategoryId {
        match self {
            LootKind::Purse => PURSE,
            LootKind::Jewel => JEWEL,
            LootKind::Strongbox => STRONGBOX,
        }
    }

    /// Values and how many tokens of each exist.
    #[must_use]
    pub fn distribution(self) -> ValueDistribution {
        match self {
            LootKind::Purse => ValueDistribution::new()
                .with_value(250, 8)
                .with_value(300, 2)
                .with_value(350, 2)
                .with_value(400, 2)
                .with_value(450, 2)
                .with_value(500, 2),
            LootKind::Jewel => ValueDistribution::new().with_value(500, 6),
            LootKind::Strongbox => ValueDistribution::new().with_value(1000, 2),
        }
    }

    fn name(self) -> &'static str {
        match self {
            LootKind::Purse => "Purse",
            LootKind::Jewel => "Jewel",
            LootKind::Strongbox => "Strongbox",
        }
    }
}

/// Round cards. The last round is always an end-of-train card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoundKind {
    AngryMarshal,
    SwivelArm,
    Braking,
    TakeItAll,
    PassengersRebellion,
    Bridge,
    Tunnel,
    PickPocket,
    MarshalsRevenge,
    Hostage,
}

impl RoundKind {
    pub const REGULAR: [RoundKind; 7] = [
        RoundKind::AngryMarshal,
        RoundKind::SwivelArm,
        RoundKind::Braking,
        RoundKind::TakeItAll,
        RoundKind::PassengersRebellion,
        RoundKind::Bridge,
        RoundKind::Tunnel,
    ];

    pub const END_OF_TRAIN: [RoundKind; 3] = [RoundKind::PickPocket, RoundKind::MarshalsRevenge, RoundKind::Hostage];

    #[must_use]
    pub const fn value(self) -> i64 {
        self as i64
    }

    #[must_use]
    pub fn from_value(value: i64) -> Option<Self> {
        let index = usize::try_from(value).ok()?;
        Self::REGULAR.iter().chain(Self::END_OF_TRAIN.iter()).nth(index).copied()
    }

    #[must_use]
    pub fn is_end_of_train(self) -> bool {
        Self::END_OF_TRAIN.contains(&self)
    }

    #[must_use]
    pub const fn category(self) -> CategoryId {
        match self {
            RoundKind::PickPocket | RoundKind::MarshalsRevenge | RoundKind::Hostage => END_ROUND_CARD,
            _ => ROUND_CARD,
        }
    }
}

/// Bandit characters. Assignments are public.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Character {
    Ghost,
    Cheyenne,
    Django,
    Tuco,
    Doc,
    Belle,
}

impl Character {
    pub const ALL: [Character; 6] = [
        Character::Ghost,
        Character::Cheyenne,
        Character::Django,
        Character::Tuco,
        Character::Doc,
        Character::Belle,
    ];

    #[must_use]
    pub const fn value(self) -> i64 {
        self as i64
    }

    #[must_use]
    pub fn from_value(value: i64) -> Option<Self> {
        Self::ALL.get(usize::try_from(value).ok()?).copied()
    }
}

/// Collections owned by one bandit.
#[derive(Clone, Debug)]
pub struct PlayerCollections {
    pub hand: CollectionId,
    pub deck: CollectionId,
    pub loot: CollectionId,
}

/// One train car. Index 0 is the locomotive.
#[derive(Clone, Debug)]
pub struct Compartment {
    pub inside: CollectionId,
    pub roof: CollectionId,
}

/// A configured Colt Express game.
#[derive(Clone, Debug)]
pub struct ColtExpress {
    config: GameConfig,
    players: Vec<PlayerCollections>,
    train: Vec<Compartment>,
    planned: CollectionId,
    rounds: CollectionId,
}

/// Builder for creating a Colt Express game.
pub struct ColtExpressBuilder {
    player_count: usize,
    hand_size: usize,
    bullets: i64,
    round_count: usize,
    hide_own_loot: bool,
}

impl Default for ColtExpressBuilder {
    fn default() -> Self {
        Self {
            player_count: 4,
            hand_size: 6,
            bullets: 6,
            round_count: 4,
            hide_own_loot: true,
        }
    }
}

impl ColtExpressBuilder {
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

    pub fn bullets(mut self, bullets: i64) -> Self {
        self.bullets = bullets;
        self
    }

    /// Regular rounds before the end-of-train round.
    pub fn round_count(mut self, count: usize) -> Self {
        assert!((1..=RoundKind::REGULAR.len()).contains(&count), "Round count must be 1-7");
        self.round_count = count;
        self
    }

    /// Whether a bandit's own loot values are hidden from them too.
    pub fn hide_own_loot(mut self, hide: bool) -> Self {
        self.hide_own_loot = hide;
        self
    }

    /// Build the game and initial state.
    pub fn build(self, seed: u64) -> Result<(ColtExpress, GameState), StateError> {
        let mut next_id = 0u16;
        let mut alloc = || {
            let id = CollectionId::new(next_id);
            next_id += 1;
            id
        };

        let mut config = GameConfig::new(self.player_count)
            .with_category(CategoryConfig::new(ACTION_CARD, "Action Card", CardKind::distribution()))
            .with_category(CategoryConfig::new(
                ROUND_CARD,
                "Round Card",
                ValueDistribution::uniform(RoundKind::REGULAR.iter().map(|k| k.value())),
            ))
            .with_category(CategoryConfig::new(
                END_ROUND_CARD,
                "End-of-Train Card",
                ValueDistribution::uniform(RoundKind::END_OF_TRAIN.iter().map(|k| k.value())),
            ));
        for kind in [LootKind::Purse, LootKind::Jewel, LootKind::Strongbox] {
            config = config.with_category(CategoryConfig::new(kind.category(), kind.name(), kind.distribution()));
        }

        let mut players = Vec::with_capacity(self.player_count);
        for player in PlayerId::all(self.player_count) {
            let pc = PlayerCollections {
                hand: alloc(),
                deck: alloc(),
                loot: alloc(),
            };
            config = config
                .with_collection(
                    CollectionConfig::new(pc.hand, format!("{} Hand", player))
                        .with_owner(player)
                        .hidden_with_pool(pc.deck),
                )
                .with_collection(CollectionConfig::new(pc.deck, format!("{} Deck", player)).with_owner(player).hidden())
                .with_collection(
                    CollectionConfig::new(pc.loot, format!("{} Loot", player))
                        .with_owner(player)
                        .with_rule(ObservabilityRule::HiddenValues {
                            visible_to_owner: !self.hide_own_loot,
                        }),
                );
            players.push(pc);
        }

        let mut train = Vec::with_capacity(self.player_count + 1);
        for car in 0..=self.player_count {
            let compartment = Compartment {
                inside: alloc(),
                roof: alloc(),
            };
            let hidden_values = ObservabilityRule::HiddenValues { visible_to_owner: false };
            config = config
                .with_collection(
                    CollectionConfig::new(compartment.inside, format!("Car {} Inside", car)).with_rule(hidden_values.clone()),
                )
                .with_collection(CollectionConfig::new(compartment.roof, format!("Car {} Roof", car)).with_rule(hidden_values));
            train.push(compartment);
        }

        let planned = alloc();
        let rounds = alloc();
        let decks = PlayerMap::new(self.player_count, |p| players[p.index()].deck);
        config = config
            .with_collection(CollectionConfig::new(planned, "Planned Actions").with_rule(ObservabilityRule::PerItem {
                return_to: ReturnTo::OwnerCollection(decks),
            }))
            .with_collection(CollectionConfig::new(rounds, "Rounds").with_rule(ObservabilityRule::FutureRounds));

        let mut state = GameState::new(&config, seed);

        // Bandits: counters, starting deck, opening hand, one $250 purse
        for (player, pc) in PlayerId::all(self.player_count).zip(&players) {
            state.public.set_counter(player, BULLETS, self.bullets);
            state.public.set_counter(player, CHARACTER, Character::ALL[player.index()].value());

            for kind in CardKind::ALL {
                for _ in 0..kind.starting_copies() {
                    let card = state.spawn(ACTION_CARD, kind.value(), Some(player));
                    state.add_to(pc.deck, card)?;
                }
            }
            state.shuffle(pc.deck)?;
            for _ in 0..self.hand_size {
                let card = state.draw(pc.deck)?;
                state.add_to(pc.hand, card)?;
            }

            let purse = state.spawn(PURSE, 250, Some(player));
            state.add_to(pc.loot, purse)?;
        }

        // Train: strongbox in the locomotive, purses and jewels in the cars
        let strongbox = state.spawn(STRONGBOX, 1000, None);
        state.add_to(train[0].inside, strongbox)?;
        for (car, compartment) in train.iter().enumerate().skip(1) {
            let value = sample_value(PURSE, &LootKind::Purse.distribution(), &mut state.rng)?;
            let purse = state.spawn(PURSE, value, None);
            state.add_to(compartment.inside, purse)?;
            if car % 2 == 0 {
                let jewel = state.spawn(JEWEL, 500, None);
                state.add_to(compartment.inside, jewel)?;
            }
        }

        // Rounds: index 0 is the first round, the last is end-of-train
        let mut kinds = RoundKind::REGULAR.to_vec();
        state.rng.shuffle(&mut kinds);
        kinds.truncate(self.round_count);
        let end = RoundKind::END_OF_TRAIN[state.rng.gen_range_usize(0..RoundKind::END_OF_TRAIN.len())];
        kinds.push(end);
        for kind in kinds.into_iter().rev() {
            let card = state.spawn(kind.category(), kind.value(), None);
            state.add_to(rounds, card)?;
        }

        let game = ColtExpress {
            config,
            players,
            train,
            planned,
            rounds,
        };

        Ok((game, state))
    }
}

impl ColtExpress {
    /// Get the collections of a player.
    pub fn player(&self, player: PlayerId) -> Result<&PlayerCollections, StateError> {
        self.players.get(player.index()).ok_or(StateError::PlayerOutOfRange {
            player,
            player_count: self.players.len(),
        })
    }

    pub fn train(&self) -> &[Compartment] {
        &self.train
    }

    pub fn planned_actions(&self) -> CollectionId {
        self.planned
    }

    pub fn rounds(&self) -> CollectionId {
        self.rounds
    }

    /// Draw `count` cards from a bandit's deck into their hand.
    pub fn draw_cards(&self, state: &mut GameState, player: PlayerId, count: usize) -> Result<(), StateError> {
        let pc = self.player(player)?;
        for _ in 0..count {
            let card = state.draw(pc.deck)?;
            state.add_to(pc.hand, card)?;
        }
        Ok(())
    }

    /// Give a bandit a new loot token.
    pub fn add_loot(
        &self,
        state: &mut GameState,
        player: PlayerId,
        kind: LootKind,
        value: i64,
    ) -> Result<EntityId, StateError> {
        let loot = state.spawn(kind.category(), value, Some(player));
        let id = loot.id;
        state.add_to(self.player(player)?.loot, loot)?;
        Ok(id)
    }

    /// Move a loot token from the train into a bandit's loot.
    pub fn collect_loot(
        &self,
        state: &mut GameState,
        player: PlayerId,
        from: CollectionId,
        loot: EntityId,
    ) -> Result<(), StateError> {
        let target = self.player(player)?.loot;
        let mut token = state.take(from, loot)?;
        token.owner = Some(player);
        state.add_to(target, token)
    }

    /// Put a bullet card into `target`'s deck.
    ///
    /// `shooter` is `None` for the marshal's neutral bullets; otherwise the
    /// shooter spends one bullet.
    pub fn add_bullet(
        &self,
        state: &mut GameState,
        target: PlayerId,
        shooter: Option<PlayerId>,
    ) -> Result<EntityId, StateError> {
        let deck = self.player(target)?.deck;
        if let Some(shooter) = shooter {
            self.player(shooter)?;
        }
        let bullet = state.spawn(ACTION_CARD, CardKind::Bullet.value(), shooter);
        let id = bullet.id;
        state.add_to(deck, bullet)?;
        if let Some(shooter) = shooter {
            state.public.modify_counter(shooter, BULLETS, -1);
        }
        Ok(id)
    }

    /// Play a card from hand onto the planned actions stack.
    ///
    /// A face-down card stays visible to the player who planned it only.
    /// Bullet cards are dead cards and cannot be planned.
    pub fn plan_card(
        &self,
        state: &mut GameState,
        player: PlayerId,
        card: EntityId,
        face_down: bool,
    ) -> Result<(), StateError> {
        let hand = self.player(player)?.hand;
        let is_bullet = state
            .deck(hand)?
            .iter()
            .any(|e| e.id == card && CardKind::from_value(e.value) == Some(CardKind::Bullet));
        if is_bullet {
            return Err(StateError::Unplayable { entity: card, collection: hand });
        }

        let entity = state.take(hand, card)?;
        let planned = state.observable_mut(self.planned)?;
        if face_down {
            planned.add_visible_to(entity, Some(player))
        } else {
            planned.add_public(entity)
        }
        .map_err(StateError::deck(self.planned))
    }

    pub fn assign_character(
        &self,
        state: &mut GameState,
        player: PlayerId,
        character: Character,
    ) -> Result<(), StateError> {
        self.player(player)?;
        state.public.set_counter(player, CHARACTER, character.value());
        Ok(())
    }

    #[must_use]
    pub fn character(&self, state: &GameState, player: PlayerId) -> Option<Character> {
        Character::from_value(state.public.get_counter(player, CHARACTER, -1))
    }

    #[must_use]
    pub fn bullets_left(&self, state: &GameState, player: PlayerId) -> i64 {
        state.public.get_counter(player, BULLETS, 0)
    }

    /// Round card being played, if any remain.
    #[must_use]
    pub fn current_round(&self, state: &GameState) -> Option<RoundKind> {
        let deck = state.deck(self.rounds).ok()?;
        let card = deck.get(state.public.round as usize).ok()?;
        RoundKind::from_value(card.value)
    }
}

impl TabletopGame for ColtExpress {
    fn name(&self) -> &'static str {
        "Colt Express"
    }

    fn config(&self) -> &GameConfig {
        &self.config
    }
}
