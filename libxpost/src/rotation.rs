//! Round-robin rotation over content categories
//!
//! The rotation state machine decides which post goes out on each scheduled
//! slot. Categories are visited in the order they appear in the content
//! file. Each category keeps its own cursor into its post list, and the
//! cursors advance once per full rotation: only after every category has
//! had its turn do all cursors step forward (wrapping per category). This
//! paces each category's content to the schedule's overall cadence.
//!
//! The state is a plain owned value with no timer or network dependency,
//! so the transition function can be driven directly in tests.

use std::collections::HashMap;

use crate::content::ContentDb;

/// Outcome of a single rotation step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// A post was selected from the category at the rotation slot
    Post { category: String, text: String },
    /// The category at the rotation slot has no posts; its slot is
    /// consumed but nothing is published
    Empty { category: String },
}

/// Mutable rotation state: the global category cursor plus one post cursor
/// per category
///
/// Held in memory for the life of the scheduled loop; there is no
/// persistence across process restarts.
#[derive(Debug, Clone)]
pub struct RotationState {
    categories: Vec<String>,
    cursors: HashMap<String, usize>,
    current: usize,
}

impl RotationState {
    /// Create the initial rotation state for a content database
    ///
    /// Category order follows the database's key order; every cursor
    /// starts at zero.
    pub fn new(db: &ContentDb) -> Self {
        let categories = db.category_names();
        let cursors = categories.iter().map(|c| (c.clone(), 0)).collect();
        Self {
            categories,
            cursors,
            current: 0,
        }
    }

    /// Advance the rotation by one slot
    ///
    /// Selects the current category's post (or notes that the category is
    /// empty), moves the global cursor to the next category, and, when a
    /// full rotation has completed, steps every non-empty category's post
    /// cursor forward with wrap-around.
    ///
    /// Returns `None` only when the database has no categories at all.
    pub fn tick(&mut self, db: &ContentDb) -> Option<Tick> {
        if self.categories.is_empty() {
            return None;
        }

        let category = self.categories[self.current].clone();
        let outcome = match db.posts(&category) {
            Some(posts) if !posts.is_empty() => {
                let cursor = self.cursors.get(&category).copied().unwrap_or(0);
                Tick::Post {
                    text: posts[cursor].clone(),
                    category,
                }
            }
            _ => Tick::Empty { category },
        };

        self.current = (self.current + 1) % self.categories.len();
        if self.current == 0 {
            self.advance_all_cursors(db);
        }

        Some(outcome)
    }

    /// Step every category's cursor after a completed rotation
    ///
    /// Empty categories are left alone so their cursor stays valid if
    /// content were reloaded with posts present.
    fn advance_all_cursors(&mut self, db: &ContentDb) {
        for category in &self.categories {
            if let Some(posts) = db.posts(category) {
                if posts.is_empty() {
                    continue;
                }
                if let Some(cursor) = self.cursors.get_mut(category) {
                    *cursor = (*cursor + 1) % posts.len();
                }
            }
        }
    }

    /// Current post cursor for a category (mainly for tests and logging)
    pub fn cursor(&self, category: &str) -> Option<usize> {
        self.cursors.get(category).copied()
    }

    /// Index of the category that the next tick will visit
    pub fn current_slot(&self) -> usize {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db_two_categories() -> ContentDb {
        ContentDb::from_pairs(vec![("A", vec!["a1", "a2"]), ("B", vec!["b1"])])
    }

    fn expect_post(tick: Option<Tick>, category: &str, text: &str) {
        match tick {
            Some(Tick::Post {
                category: c,
                text: t,
            }) => {
                assert_eq!(c, category);
                assert_eq!(t, text);
            }
            other => panic!("Expected post from {}, got {:?}", category, other),
        }
    }

    #[test]
    fn test_initial_state() {
        let db = db_two_categories();
        let state = RotationState::new(&db);

        assert_eq!(state.current_slot(), 0);
        assert_eq!(state.cursor("A"), Some(0));
        assert_eq!(state.cursor("B"), Some(0));
    }

    #[test]
    fn test_rotation_follows_category_order() {
        let db = db_two_categories();
        let mut state = RotationState::new(&db);

        expect_post(state.tick(&db), "A", "a1");
        expect_post(state.tick(&db), "B", "b1");
        expect_post(state.tick(&db), "A", "a2");
        expect_post(state.tick(&db), "B", "b1");
    }

    #[test]
    fn test_cursors_advance_once_per_full_rotation() {
        let db = db_two_categories();
        let mut state = RotationState::new(&db);

        // Tick 1: A's slot, cursor untouched mid-rotation
        state.tick(&db);
        assert_eq!(state.cursor("A"), Some(0));
        assert_eq!(state.cursor("B"), Some(0));

        // Tick 2 completes the rotation: both cursors step, B wraps to 0
        state.tick(&db);
        assert_eq!(state.cursor("A"), Some(1));
        assert_eq!(state.cursor("B"), Some(0));

        // Ticks 3 and 4: second rotation, A wraps back to 0
        state.tick(&db);
        state.tick(&db);
        assert_eq!(state.cursor("A"), Some(0));
        assert_eq!(state.cursor("B"), Some(0));
    }

    #[test]
    fn test_empty_category_consumes_its_slot() {
        let db = ContentDb::from_pairs(vec![
            ("A", vec!["a1"]),
            ("gap", vec![]),
            ("B", vec!["b1", "b2"]),
        ]);
        let mut state = RotationState::new(&db);

        expect_post(state.tick(&db), "A", "a1");
        assert_eq!(
            state.tick(&db),
            Some(Tick::Empty {
                category: "gap".to_string()
            })
        );
        expect_post(state.tick(&db), "B", "b1");

        // Full rotation completed: non-empty cursors advanced, the empty
        // category's cursor stayed at zero
        assert_eq!(state.cursor("A"), Some(0)); // wrapped, len 1
        assert_eq!(state.cursor("gap"), Some(0));
        assert_eq!(state.cursor("B"), Some(1));

        expect_post(state.tick(&db), "A", "a1");
        assert_eq!(
            state.tick(&db),
            Some(Tick::Empty {
                category: "gap".to_string()
            })
        );
        expect_post(state.tick(&db), "B", "b2");
    }

    #[test]
    fn test_single_category_wraps_through_posts() {
        let db = ContentDb::from_pairs(vec![("only", vec!["p1", "p2", "p3"])]);
        let mut state = RotationState::new(&db);

        // With one category, every tick completes a rotation
        expect_post(state.tick(&db), "only", "p1");
        expect_post(state.tick(&db), "only", "p2");
        expect_post(state.tick(&db), "only", "p3");
        expect_post(state.tick(&db), "only", "p1");
    }

    #[test]
    fn test_all_categories_empty() {
        let db = ContentDb::from_pairs(vec![("A", vec![]), ("B", vec![])]);
        let mut state = RotationState::new(&db);

        // Slots are still consumed in order
        assert_eq!(
            state.tick(&db),
            Some(Tick::Empty {
                category: "A".to_string()
            })
        );
        assert_eq!(
            state.tick(&db),
            Some(Tick::Empty {
                category: "B".to_string()
            })
        );
        assert_eq!(
            state.tick(&db),
            Some(Tick::Empty {
                category: "A".to_string()
            })
        );
    }

    #[test]
    fn test_no_categories() {
        let db = ContentDb::from_pairs(Vec::<(&str, Vec<&str>)>::new());
        let mut state = RotationState::new(&db);
        assert_eq!(state.tick(&db), None);
    }

    #[test]
    fn test_long_run_stays_in_bounds() {
        let db = ContentDb::from_pairs(vec![
            ("A", vec!["a1", "a2", "a3"]),
            ("B", vec!["b1", "b2"]),
            ("C", vec!["c1"]),
        ]);
        let mut state = RotationState::new(&db);

        for _ in 0..100 {
            let tick = state.tick(&db).unwrap();
            if let Tick::Post { category, text } = tick {
                let posts = db.posts(&category).unwrap();
                assert!(posts.iter().any(|p| p == &text));
            }
            for name in db.category_names() {
                let cursor = state.cursor(&name).unwrap();
                let len = db.posts(&name).unwrap().len();
                assert!(len == 0 || cursor < len);
            }
        }
    }
}
