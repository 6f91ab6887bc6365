//! Merge sort stabile e decrescente usato per unire le sorgenti del feed
//!
//! Il passo di merge e' esposto separatamente: due liste gia' ordinate
//! (ad esempio i post di due forum) si intercalano senza riordinare tutto.

/// Unisce due liste ordinate in modo decrescente per `key`.
/// A parità di chiave gli elementi di `left` precedono quelli di `right`.
pub fn merge_desc<T, K, F>(left: Vec<T>, right: Vec<T>, key: &F) -> Vec<T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => key(l) >= key(r),
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        if take_left {
            merged.extend(left.next());
        } else {
            merged.extend(right.next());
        }
    }

    merged
}

/// Merge sort classico (divide et impera), stabile, decrescente per `key`
pub fn merge_sort_desc<T, K, F>(mut items: Vec<T>, key: &F) -> Vec<T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    if items.len() <= 1 {
        return items;
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort_desc(items, key);
    let right = merge_sort_desc(right, key);
    merge_desc(left, right, key)
}
