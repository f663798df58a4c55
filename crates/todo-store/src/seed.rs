//! Sample data for a brand-new profile.

use chrono::Utc;
use rand::Rng;
use todo_seed::{SeedClient, SeedTodo};

use crate::item::{has_content, Priority, TodoItem};

/// Probability that a seeded todo starts out featured.
const FEATURED_PROBABILITY: f64 = 0.3;

/// Something that can provide sample todos.
#[allow(async_fn_in_trait)]
pub trait SeedSource {
    /// Fetches the raw sample records.
    async fn fetch(&self) -> todo_seed::Result<Vec<SeedTodo>>;
}

impl SeedSource for SeedClient {
    async fn fetch(&self) -> todo_seed::Result<Vec<SeedTodo>> {
        self.fetch_todos().await
    }
}

/// Turns raw sample records into todos.
///
/// The record id becomes the todo id, the title its text, and `completed`
/// carries over. Each todo is featured with probability 0.3 and gets a
/// uniformly random priority. Records with a blank title are skipped.
pub fn to_items<R: Rng>(records: Vec<SeedTodo>, rng: &mut R) -> Vec<TodoItem> {
    let now = Utc::now();
    records
        .into_iter()
        .filter(|record| has_content(&record.title))
        .map(|record| {
            let mut item = TodoItem::with_id(record.id.to_string(), record.title, now);
            item.completed = record.completed;
            item.featured = rng.random_bool(FEATURED_PROBABILITY);
            item.priority = random_priority(rng);
            item
        })
        .collect()
}

fn random_priority<R: Rng>(rng: &mut R) -> Priority {
    Priority::ALL[rng.random_range(0..Priority::ALL.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record(id: u64, title: &str, completed: bool) -> SeedTodo {
        SeedTodo {
            id,
            user_id: Some(1),
            title: title.to_string(),
            completed,
        }
    }

    #[test]
    fn test_to_items_maps_fields() {
        let mut rng = StdRng::seed_from_u64(7);
        let items = to_items(
            vec![record(1, "delectus aut autem", false), record(4, "et porro", true)],
            &mut rng,
        );

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "1");
        assert_eq!(items[0].text, "delectus aut autem");
        assert!(!items[0].completed);
        assert_eq!(items[1].id, "4");
        assert!(items[1].completed);
    }

    #[test]
    fn test_to_items_skips_blank_titles() {
        let mut rng = StdRng::seed_from_u64(1);
        let items = to_items(vec![record(1, "  ", false), record(2, "ok", false)], &mut rng);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "2");
    }

    #[test]
    fn test_to_items_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(to_items(Vec::new(), &mut rng).is_empty());
    }

    #[test]
    fn test_random_fields_are_deterministic_for_a_seed() {
        let records: Vec<SeedTodo> = (1..=20).map(|i| record(i, "t", false)).collect();

        let a = to_items(records.clone(), &mut StdRng::seed_from_u64(42));
        let b = to_items(records, &mut StdRng::seed_from_u64(42));

        let flags = |items: &[TodoItem]| -> Vec<(bool, Priority)> {
            items.iter().map(|i| (i.featured, i.priority)).collect()
        };
        assert_eq!(flags(&a), flags(&b));
    }

    #[test]
    fn test_random_fields_cover_the_domain() {
        let records: Vec<SeedTodo> = (1..=300).map(|i| record(i, "t", false)).collect();
        let items = to_items(records, &mut StdRng::seed_from_u64(3));

        for level in Priority::ALL {
            assert!(
                items.iter().any(|i| i.priority == level),
                "no todo got priority {level}"
            );
        }

        let featured = items.iter().filter(|i| i.featured).count();
        // 0.3 of 300 is 90; allow wide slack for the fixed seed
        assert!(
            (40..=140).contains(&featured),
            "featured count out of range: {featured}"
        );
    }
}
