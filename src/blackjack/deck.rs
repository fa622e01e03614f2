//! A 52-card deck reduced to card values; suits never matter here.

use rand::rngs::SmallRng;
use rand::Rng;

/// Value-only deck: 2..=9 four times each, sixteen 10-valued cards
/// (10, J, Q, K), and four aces counted as `ace_value` (1 or 11 depending
/// on the exercise).
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<u8>,
}

impl Deck {
    pub fn fresh(ace_value: u8) -> Self {
        let mut cards = Vec::with_capacity(52);
        for value in 2..=9 {
            for _ in 0..4 {
                cards.push(value);
            }
        }
        for _ in 0..16 {
            cards.push(10);
        }
        for _ in 0..4 {
            cards.push(ace_value);
        }
        Deck { cards }
    }

    /// Draw a uniformly random remaining card. Panics on an empty deck;
    /// every game here stops long before 52 draws.
    pub fn draw(&mut self, rng: &mut SmallRng) -> u8 {
        let i = rng.random_range(0..self.cards.len());
        self.cards.swap_remove(i)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_fresh_deck_composition() {
        let deck = Deck::fresh(1);
        assert_eq!(deck.remaining(), 52);
        // 4*(2+..+9) + 16*10 + 4*1
        let total: u32 = deck.cards.iter().map(|&c| c as u32).sum();
        assert_eq!(total, 176 + 160 + 4);

        let deck = Deck::fresh(11);
        let total: u32 = deck.cards.iter().map(|&c| c as u32).sum();
        assert_eq!(total, 176 + 160 + 44);
    }

    #[test]
    fn test_draw_depletes_without_replacement() {
        let mut deck = Deck::fresh(11);
        let mut rng = SmallRng::seed_from_u64(42);
        let mut tens = 0;
        for i in 0..52 {
            let card = deck.draw(&mut rng);
            assert!((2..=11).contains(&card));
            if card == 10 {
                tens += 1;
            }
            assert_eq!(deck.remaining(), 51 - i);
        }
        assert_eq!(tens, 16);
    }

    #[test]
    fn test_draw_deterministic() {
        let mut a = Deck::fresh(1);
        let mut b = Deck::fresh(1);
        let mut rng_a = SmallRng::seed_from_u64(7);
        let mut rng_b = SmallRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(a.draw(&mut rng_a), b.draw(&mut rng_b));
        }
    }
}
