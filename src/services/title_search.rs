use rand::{seq::IndexedRandom, Rng};

use crate::index::{MovieIndex, MovieRecord};

/// Case-insensitive substring filter over corpus titles, in corpus order.
///
/// A blank query matches everything.
pub fn search_titles<'a>(index: &'a MovieIndex, query: &str, limit: usize) -> Vec<&'a MovieRecord> {
    let needle = query.trim().to_lowercase();
    index
        .movies()
        .iter()
        .filter(|movie| needle.is_empty() || movie.title.to_lowercase().contains(&needle))
        .take(limit)
        .collect()
}

/// Picks a movie uniformly at random for the "surprise me" shortcut.
pub fn random_movie<'a, R: Rng + ?Sized>(index: &'a MovieIndex, rng: &mut R) -> Option<&'a MovieRecord> {
    index.movies().choose(rng)
}
