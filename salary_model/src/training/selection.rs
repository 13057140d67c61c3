/// Picks the item with the highest score.
///
/// The first maximum wins ties, and a NaN score never beats a comparable one. Returns
/// `None` only when there are no items at all.
pub fn select_best<T, I>(scored: I) -> Option<(f64, T)>
where
    I: IntoIterator<Item = (f64, T)>,
{
    let mut best: Option<(f64, T)> = None;

    for (score, item) in scored {
        let replace = match &best {
            None => true,
            Some((best_score, _)) => {
                score > *best_score || (best_score.is_nan() && !score.is_nan())
            }
        };

        if replace {
            best = Some((score, item));
        }
    }

    best
}
