/// Maximum edit distance for a name to count as a near miss.
pub const MAX_SUGGESTION_DISTANCE: usize = 2;

/// Suggest the closest candidate for a probable typo.
///
/// Returns the candidate with the smallest edit distance, provided it is within
/// [`MAX_SUGGESTION_DISTANCE`] and not identical to `input`. Ties keep the first
/// candidate in iteration order.
///
/// # Examples
/// ```
/// use parity_core::utils::suggest;
/// let rules = ["double_string", "compound_string"];
/// assert_eq!(suggest("doublestring", rules), Some("double_string"));
/// assert_eq!(suggest("macro", rules), None);
/// ```
pub fn suggest<'a, I>(input: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .filter(|c| *c != input)
        .map(|c| (levenshtein(c, input), c))
        .filter(|(d, _)| *d <= MAX_SUGGESTION_DISTANCE)
        .min_by_key(|(d, _)| *d)
        .map(|(_, c)| c)
}

/// Character-level Levenshtein distance.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Byte offset to 1-based line number.
pub fn line_of(source: &str, offset: usize) -> usize {
    let end = offset.min(source.len());
    source.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}
