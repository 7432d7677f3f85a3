//! Collision layer system for filtering collision detection
//!
//! Every body sits on exactly one layer and carries a mask of the layers it
//! is willing to touch. A pair is only tested when each side accepts the other.

bitflags::bitflags! {
    /// Collision layer bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionLayers: u32 {
        /// Player character layer
        const PLAYER = 1 << 0;
        /// Enemy character layer
        const ENEMY = 1 << 1;
        /// Projectiles (bullets, missiles, etc.)
        const PROJECTILE = 1 << 2;
        /// Static environment geometry
        const ENVIRONMENT = 1 << 3;
    }
}

impl CollisionLayers {
    /// Check if two bodies should collide based on their layers and masks
    ///
    /// # Example
    /// ```
    /// use arena_engine::physics::CollisionLayers;
    ///
    /// let player_mask = CollisionLayers::ENEMY | CollisionLayers::ENVIRONMENT;
    /// let enemy_mask = CollisionLayers::all();
    ///
    /// assert!(CollisionLayers::should_collide(
    ///     CollisionLayers::PLAYER, player_mask,
    ///     CollisionLayers::ENEMY, enemy_mask,
    /// ));
    /// ```
    pub fn should_collide(
        layer_a: CollisionLayers,
        mask_a: CollisionLayers,
        layer_b: CollisionLayers,
        mask_b: CollisionLayers,
    ) -> bool {
        // A's layer must be in B's mask AND B's layer must be in A's mask
        mask_b.intersects(layer_a) && mask_a.intersects(layer_b)
    }
}
