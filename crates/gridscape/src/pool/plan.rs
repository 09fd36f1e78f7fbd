//! Shape planning: which variant each slot renders as this run.
//!
//! Within a category the slots are split into two near-equal halves, big
//! variants and small ones. The split is keyed on a per-slot hash so it is
//! stable under pool growth: adding a slot flips at most one existing
//! assignment, and removing one behaves symmetrically.
use crate::grid::LayoutMode;
use crate::hash;
use crate::pool::{Category, Pool};

/// Assigns a shape variant to every slot in the pool.
///
/// Slots of a category are ordered by a salted per-slot hash; the first half
/// becomes the big variant, the rest the small one. When the category count
/// is odd, a salted coin decides which half gets the extra slot, with the
/// big side growing more likely as `signal` rises.
pub fn assign_shapes(pool: &mut Pool, signal: f64, salt: u32, mode: LayoutMode) {
    let u = signal.clamp(0.0, 1.0);
    for category in Category::ALL {
        let mut members: Vec<(u32, u32)> = pool
            .slots()
            .iter()
            .filter(|s| s.category == category)
            .map(|s| {
                let key = hash::hash32(&format!("{}|{}|{salt}", category.tag(), s.id));
                (key, s.id)
            })
            .collect();
        if members.is_empty() {
            continue;
        }
        members.sort_unstable();

        let n = members.len();
        let mut big = n / 2;
        if n % 2 == 1 {
            let coin = hash::hash01(&format!("odd|{}|{salt}|{}", category.tag(), mode.tag()));
            if coin < 0.25 + 0.5 * u {
                big += 1;
            }
        }

        let [big_variant, small_variant] = category.variants();
        for (rank, (_, id)) in members.iter().enumerate() {
            let shape = if rank < big { big_variant } else { small_variant };
            if let Some(slot) = pool.slots_mut().iter_mut().find(|s| s.id == *id) {
                slot.shape = Some(shape);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Shape;

    fn pool_of(category: Category, n: usize) -> Pool {
        let mut pool = Pool::new();
        pool.resize(n);
        for slot in pool.slots_mut() {
            slot.category = category;
        }
        pool
    }

    fn big_count(pool: &Pool, big: Shape) -> usize {
        pool.slots().iter().filter(|s| s.shape == Some(big)).count()
    }

    #[test]
    fn every_slot_gets_a_shape() {
        let mut pool = Pool::new();
        pool.resize(9);
        for (i, slot) in pool.slots_mut().iter_mut().enumerate() {
            slot.category = Category::ALL[i % 4];
        }
        assign_shapes(&mut pool, 0.5, 7, LayoutMode::Normal);
        assert!(pool.slots().iter().all(|s| s.shape.is_some()));
    }

    #[test]
    fn even_categories_split_evenly() {
        let mut pool = pool_of(Category::Flora, 6);
        assign_shapes(&mut pool, 0.5, 42, LayoutMode::Normal);
        assert_eq!(big_count(&pool, Shape::Tree), 3);
        assert_eq!(big_count(&pool, Shape::Shrub), 3);
    }

    #[test]
    fn odd_categories_split_within_one() {
        let mut pool = pool_of(Category::Traffic, 7);
        assign_shapes(&mut pool, 0.5, 42, LayoutMode::Normal);
        let cars = big_count(&pool, Shape::Car);
        assert!(cars == 3 || cars == 4);
        assert_eq!(big_count(&pool, Shape::Cart), 7 - cars);
    }

    #[test]
    fn assignments_are_deterministic() {
        let mut a = pool_of(Category::Housing, 8);
        let mut b = pool_of(Category::Housing, 8);
        assign_shapes(&mut a, 0.3, 99, LayoutMode::Normal);
        assign_shapes(&mut b, 0.3, 99, LayoutMode::Normal);
        let shapes_a: Vec<_> = a.slots().iter().map(|s| s.shape).collect();
        let shapes_b: Vec<_> = b.slots().iter().map(|s| s.shape).collect();
        assert_eq!(shapes_a, shapes_b);
    }

    #[test]
    fn growing_a_category_flips_at_most_one_slot() {
        for salt in [1u32, 2, 3, 40, 500] {
            let mut before = pool_of(Category::Flora, 6);
            assign_shapes(&mut before, 0.5, salt, LayoutMode::Normal);

            let mut after = pool_of(Category::Flora, 7);
            assign_shapes(&mut after, 0.5, salt, LayoutMode::Normal);

            let flips = before
                .slots()
                .iter()
                .filter(|s| {
                    let now = after.slots().iter().find(|a| a.id == s.id);
                    now.is_some_and(|a| a.shape != s.shape)
                })
                .count();
            assert!(flips <= 1, "salt={salt} flips={flips}");
        }
    }

    #[test]
    fn stronger_signal_never_shrinks_the_big_half() {
        for salt in [0u32, 11, 77, 1234] {
            let mut calm = pool_of(Category::Sky, 5);
            assign_shapes(&mut calm, 0.0, salt, LayoutMode::Normal);
            let mut busy = pool_of(Category::Sky, 5);
            assign_shapes(&mut busy, 1.0, salt, LayoutMode::Normal);
            assert!(big_count(&busy, Shape::Cloud) >= big_count(&calm, Shape::Cloud));
        }
    }
}
