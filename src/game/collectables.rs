// Pickups: coins, gems, keys and hearts

use std::f32::consts::TAU;
use std::fmt;

use glam::Vec2;
use log::debug;
use rand::Rng;

use super::session::GameSession;

/// Hit points restored by a heart
pub const HEART_HEAL: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectableKind {
    Coin,
    Gem,
    GemRed,
    GemBlue,
    GemGreen,
    GemYellow,
    Key,
    Heart,
}

impl CollectableKind {
    pub const ALL: [CollectableKind; 8] = [
        Self::Coin,
        Self::Gem,
        Self::GemRed,
        Self::GemBlue,
        Self::GemGreen,
        Self::GemYellow,
        Self::Key,
        Self::Heart,
    ];

    /// Points awarded when picked up
    pub fn default_score(&self) -> u32 {
        match self {
            Self::Coin => 10,
            Self::Gem | Self::GemRed | Self::GemBlue | Self::GemGreen | Self::GemYellow => 20,
            Self::Key | Self::Heart => 0,
        }
    }

    pub fn is_gem(&self) -> bool {
        matches!(
            self,
            Self::Gem | Self::GemRed | Self::GemBlue | Self::GemGreen | Self::GemYellow
        )
    }

    /// Plural lowercase name used in objective descriptions
    pub fn plural_name(&self) -> &'static str {
        match self {
            Self::Coin => "coins",
            Self::Gem => "gems",
            Self::GemRed => "red gems",
            Self::GemBlue => "blue gems",
            Self::GemGreen => "green gems",
            Self::GemYellow => "yellow gems",
            Self::Key => "keys",
            Self::Heart => "hearts",
        }
    }

    /// Capitalised name used by the HUD
    pub fn label(&self) -> &'static str {
        match self {
            Self::Coin => "Coins",
            Self::Gem => "Gems",
            Self::GemRed => "Red Gems",
            Self::GemBlue => "Blue Gems",
            Self::GemGreen => "Green Gems",
            Self::GemYellow => "Yellow Gems",
            Self::Key => "Keys",
            Self::Heart => "Hearts",
        }
    }
}

impl fmt::Display for CollectableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// What picking up an item did beyond the session bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pickup {
    pub kind: CollectableKind,
    /// Hit points to restore on the player
    pub heal: u32,
}

/// An item lying in the level
#[derive(Debug, Clone)]
pub struct CollectableItem {
    pub kind: CollectableKind,
    pub score_value: u32,
    pub position: Vec2,
    collected: bool,
}

impl CollectableItem {
    pub fn new(kind: CollectableKind, position: Vec2) -> Self {
        Self {
            kind,
            score_value: kind.default_score(),
            position,
            collected: false,
        }
    }

    pub fn with_score(mut self, score_value: u32) -> Self {
        self.score_value = score_value;
        self
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Apply the item to the session. Returns `None` if it was already taken.
    pub fn collect(&mut self, session: &mut GameSession) -> Option<Pickup> {
        if self.collected {
            return None;
        }
        self.collected = true;

        let mut heal = 0;
        match self.kind {
            CollectableKind::Key => session.add_key(),
            CollectableKind::Heart => heal = HEART_HEAL,
            kind => {
                session.add_score(self.score_value);
                session.add_collectable(kind, 1);
            }
        }

        debug!("Collected {} at {:?}", self.kind, self.position);
        Some(Pickup {
            kind: self.kind,
            heal,
        })
    }
}

/// Scatters a configured number of items around a point
#[derive(Debug, Clone)]
pub struct CollectableSpawner {
    pub position: Vec2,
    pub spawn_radius: f32,
    pub max_items: usize,
    pub coins: usize,
    pub gems: usize,
    pub keys: usize,
    pub hearts: usize,
}

impl Default for CollectableSpawner {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            spawn_radius: 5.0,
            max_items: 10,
            coins: 5,
            gems: 2,
            keys: 1,
            hearts: 1,
        }
    }
}

impl CollectableSpawner {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Roll positions for every configured item, coins first, capped at `max_items`
    pub fn spawn<R: Rng>(&self, rng: &mut R) -> Vec<CollectableItem> {
        let plan = [
            (CollectableKind::Coin, self.coins),
            (CollectableKind::Gem, self.gems),
            (CollectableKind::Key, self.keys),
            (CollectableKind::Heart, self.hearts),
        ];

        plan.iter()
            .flat_map(|(kind, count)| std::iter::repeat(*kind).take(*count))
            .take(self.max_items)
            .map(|kind| CollectableItem::new(kind, self.position + self.random_offset(rng)))
            .collect()
    }

    /// Uniform point inside the spawn circle
    fn random_offset<R: Rng>(&self, rng: &mut R) -> Vec2 {
        let angle = rng.gen_range(0.0..TAU);
        let distance = self.spawn_radius * rng.gen::<f32>().sqrt();
        Vec2::new(angle.cos(), angle.sin()) * distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_scores() {
        assert_eq!(CollectableKind::Coin.default_score(), 10);
        assert_eq!(CollectableKind::GemBlue.default_score(), 20);
        assert_eq!(CollectableKind::Key.default_score(), 0);
        assert_eq!(CollectableKind::Heart.default_score(), 0);
        assert!(CollectableKind::GemYellow.is_gem());
        assert!(!CollectableKind::Coin.is_gem());
    }

    #[test]
    fn test_collect_coin_adds_score_and_count() {
        let mut session = GameSession::new();
        let mut coin = CollectableItem::new(CollectableKind::Coin, Vec2::ZERO);

        let pickup = coin.collect(&mut session).unwrap();
        assert_eq!(pickup.heal, 0);
        assert_eq!(session.score(), 10);
        assert_eq!(session.collectable_count(CollectableKind::Coin), 1);
        assert!(coin.is_collected());
        assert!(coin.collect(&mut session).is_none());
        assert_eq!(session.score(), 10);
    }

    #[test]
    fn test_collect_key_and_heart() {
        let mut session = GameSession::new();
        CollectableItem::new(CollectableKind::Key, Vec2::ZERO).collect(&mut session);
        assert_eq!(session.key_count(), 1);
        assert_eq!(session.score(), 0);

        let pickup = CollectableItem::new(CollectableKind::Heart, Vec2::ZERO)
            .collect(&mut session)
            .unwrap();
        assert_eq!(pickup.heal, HEART_HEAL);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_custom_score_value() {
        let mut session = GameSession::new();
        CollectableItem::new(CollectableKind::GemRed, Vec2::ZERO)
            .with_score(50)
            .collect(&mut session);
        assert_eq!(session.score(), 50);
        assert_eq!(session.collectable_count(CollectableKind::GemRed), 1);
        assert_eq!(session.collectable_count(CollectableKind::Gem), 0);
    }

    #[test]
    fn test_spawner_counts_and_radius() {
        let spawner = CollectableSpawner::at(Vec2::new(10.0, 3.0));
        let mut rng = StdRng::seed_from_u64(7);
        let items = spawner.spawn(&mut rng);

        assert_eq!(items.len(), 9);
        let coins = items
            .iter()
            .filter(|i| i.kind == CollectableKind::Coin)
            .count();
        assert_eq!(coins, 5);
        for item in &items {
            assert!(item.position.distance(spawner.position) <= spawner.spawn_radius + 1e-4);
        }
    }

    #[test]
    fn test_spawner_respects_max_items() {
        let spawner = CollectableSpawner {
            max_items: 3,
            ..CollectableSpawner::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let items = spawner.spawn(&mut rng);
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|i| i.kind == CollectableKind::Coin));
    }

    #[test]
    fn test_spawner_is_deterministic_for_a_seed() {
        let spawner = CollectableSpawner::default();
        let a = spawner.spawn(&mut StdRng::seed_from_u64(42));
        let b = spawner.spawn(&mut StdRng::seed_from_u64(42));
        let pa: Vec<Vec2> = a.iter().map(|i| i.position).collect();
        let pb: Vec<Vec2> = b.iter().map(|i| i.position).collect();
        assert_eq!(pa, pb);
    }
}
