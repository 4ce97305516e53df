/// Number of items added to the cart this session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartCounter {
    count: u32,
}

impl CartCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn add(&mut self) -> u32 {
        self.count = self.count.saturating_add(1);
        self.count
    }

    pub fn clear(&mut self) {
        self.count = 0;
    }

    /// Badge text; hidden while the cart is empty.
    pub fn badge(&self) -> Option<String> {
        (self.count > 0).then(|| self.count.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_appears_after_first_add() {
        let mut cart = CartCounter::new();
        assert_eq!(cart.badge(), None);

        cart.add();
        assert_eq!(cart.add(), 2);
        assert_eq!(cart.badge(), Some("2".to_string()));

        cart.clear();
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.badge(), None);
    }
}
