//! Motivational quotes shown when a break ends.

use rand::seq::SliceRandom;

/// The fixed quote pool.
pub const MOTIVATIONAL_QUOTES: &[&str] = &[
    "The secret of getting ahead is getting started. – Mark Twain",
    "You don't have to be great to start, but you have to start to be great. – Zig Ziglar",
    "Success is the sum of small efforts, repeated day in and day out. – Robert Collier",
    "The only way to do great work is to love what you do. – Steve Jobs",
    "Focus on being productive instead of busy. – Tim Ferriss",
    "Don't watch the clock; do what it does. Keep going. – Sam Levenson",
    "The future depends on what you do today. – Mahatma Gandhi",
    "It always seems impossible until it's done. – Nelson Mandela",
    "Your time is limited, don't waste it living someone else's life. – Steve Jobs",
    "The best way to predict the future is to create it. – Abraham Lincoln",
];

/// Shuffle-bag over a quote pool.
///
/// Every quote is drawn once before the bag is refilled and reshuffled.
#[derive(Debug, Clone)]
pub struct QuoteBag {
    pool: &'static [&'static str],
    bag: Vec<&'static str>,
}

impl QuoteBag {
    /// Bag over the built-in pool.
    #[must_use]
    pub fn new() -> Self {
        Self::with_pool(MOTIVATIONAL_QUOTES)
    }

    /// Bag over a custom pool.
    #[must_use]
    pub const fn with_pool(pool: &'static [&'static str]) -> Self {
        Self {
            pool,
            bag: Vec::new(),
        }
    }

    /// Draw the next quote. Returns `None` only for an empty pool.
    pub fn draw(&mut self) -> Option<&'static str> {
        if self.bag.is_empty() {
            self.bag = self.pool.to_vec();
            self.bag.shuffle(&mut rand::thread_rng());
        }
        self.bag.pop()
    }

    /// Quotes left before the next refill.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.bag.len()
    }
}

impl Default for QuoteBag {
    fn default() -> Self {
        Self::new()
    }
}
