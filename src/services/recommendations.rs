use crate::{
    index::MovieIndex,
    models::{EnrichedRecommendation, Recommendation},
    services::enrichment::Enricher,
};

/// Ranks every other movie by similarity to `title` and keeps the top `top_n`.
///
/// An unknown title yields an empty list. Ties keep corpus order, and rows
/// sharing the query's exact title are never recommended back.
pub fn recommend(index: &MovieIndex, title: &str, top_n: usize) -> Vec<Recommendation> {
    let Some(row) = index.position(title) else {
        tracing::debug!(title = %title, "Title not in corpus");
        return Vec::new();
    };

    let movies = index.movies();
    let query_title = &movies[row].title;

    let mut scored: Vec<(usize, f32)> = index
        .similarity()
        .row(row)
        .enumerate()
        .filter(|(other, _)| *other != row && movies[*other].title != *query_title)
        .collect();

    // sort_by is stable, so equal scores stay in corpus order
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    scored
        .into_iter()
        .take(top_n)
        .enumerate()
        .map(|(position, (other, score))| Recommendation {
            rank: position + 1,
            title: movies[other].title.clone(),
            genres: movies[other].genres.clone(),
            score,
        })
        .collect()
}

/// Recommends and then enriches each result, one lookup at a time.
pub async fn recommend_enriched(
    index: &MovieIndex,
    enricher: &Enricher,
    title: &str,
    top_n: usize,
) -> Vec<EnrichedRecommendation> {
    let recommendations = recommend(index, title, top_n);

    let mut enriched = Vec::with_capacity(recommendations.len());
    for recommendation in recommendations {
        let enrichment = enricher.describe(&recommendation.title).await;
        enriched.push(EnrichedRecommendation {
            recommendation,
            enrichment: Some(enrichment),
        });
    }

    tracing::info!(
        title = %title,
        results = enriched.len(),
        enrichment_enabled = enricher.is_enabled(),
        "Recommendations generated"
    );

    enriched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::MovieRecord;
    use crate::cache::Cache;
    use crate::error::AppError;
    use crate::models::{DESCRIPTION_UNAVAILABLE, DESCRIPTION_UNREACHABLE};
    use crate::services::providers::MockMetadataProvider;
    use std::sync::Arc;

    fn corpus() -> MovieIndex {
        MovieIndex::build(vec![
            MovieRecord::new("Toy Story (1995)", "Animation|Children's|Comedy"),
            MovieRecord::new("Heat (1995)", "Action|Crime|Thriller"),
            MovieRecord::new("Toy Story 2 (1999)", "Animation|Children's|Comedy"),
            MovieRecord::new("Balto (1995)", "Animation|Children's"),
            MovieRecord::new("Casino (1995)", "Drama|Thriller"),
            MovieRecord::new("Aladdin (1992)", "Animation|Children's|Comedy|Musical"),
            MovieRecord::new("Sudden Death (1995)", "Action"),
        ])
        .unwrap()
    }

    #[test]
    fn test_returns_min_of_n_and_corpus_minus_one() {
        let index = corpus();
        for movie in index.movies() {
            for n in [0, 1, 3, 6, 10] {
                let results = recommend(&index, &movie.title, n);
                assert_eq!(results.len(), n.min(index.len() - 1));
                assert!(results.iter().all(|r| r.title != movie.title));
            }
        }
    }

    #[test]
    fn test_scores_are_non_increasing_and_ranks_sequential() {
        let index = corpus();
        let results = recommend(&index, "Toy Story (1995)", 6);
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        let ranks: Vec<usize> = results.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_similar_titles_rank_first() {
        let index = corpus();
        let results = recommend(&index, "Toy Story (1995)", 3);
        assert_eq!(results[0].title, "Toy Story 2 (1999)");
        assert!(results.iter().all(|r| r.genres.contains("Animation")));
    }

    #[test]
    fn test_unknown_title_is_empty() {
        let index = corpus();
        assert!(recommend(&index, "Not A Movie (2042)", 5).is_empty());
    }

    #[test]
    fn test_ties_keep_corpus_order() {
        let index = MovieIndex::build(vec![
            MovieRecord::new("Alpha", "Western"),
            MovieRecord::new("Bravo", "Western"),
            MovieRecord::new("Charlie", "Western"),
            MovieRecord::new("Delta", "Western"),
        ])
        .unwrap();

        let titles: Vec<String> = recommend(&index, "Charlie", 3)
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["Alpha", "Bravo", "Delta"]);
    }

    #[test]
    fn test_duplicate_titles_are_not_recommended_back() {
        let index = MovieIndex::build(vec![
            MovieRecord::new("Hamlet", "Drama"),
            MovieRecord::new("Hamlet", "Drama"),
            MovieRecord::new("Othello", "Drama"),
        ])
        .unwrap();

        let results = recommend(&index, "Hamlet", 5);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Othello");
    }

    #[tokio::test]
    async fn test_recommend_enriched_completes_without_catalog() {
        let index = corpus();
        let results = recommend_enriched(&index, &Enricher::disabled(), "Heat (1995)", 2).await;

        assert_eq!(results.len(), 2);
        for result in results {
            let enrichment = result.enrichment.unwrap();
            assert_eq!(enrichment.description(), DESCRIPTION_UNAVAILABLE);
        }
    }

    #[tokio::test]
    async fn test_recommend_enriched_completes_when_catalog_is_down() {
        let index = corpus();
        let mut mock = MockMetadataProvider::new();
        mock.expect_name().return_const("mock");
        mock.expect_search_movie()
            .times(4)
            .returning(|_| Err(AppError::ExternalApi("connection refused".to_string())));
        mock.expect_fetch_details().never();
        let enricher = Enricher::new(Arc::new(mock), Cache::new());

        let results = recommend_enriched(&index, &enricher, "Toy Story (1995)", 4).await;

        let expected: Vec<String> = recommend(&index, "Toy Story (1995)", 4)
            .into_iter()
            .map(|r| r.title)
            .collect();
        let titles: Vec<String> = results
            .iter()
            .map(|r| r.recommendation.title.clone())
            .collect();
        assert_eq!(titles, expected);

        for result in results {
            let enrichment = result.enrichment.unwrap();
            assert_eq!(enrichment.description(), DESCRIPTION_UNREACHABLE);
            let details = enrichment.details();
            assert!(details.and_then(|d| d.poster_url()).is_none());
            assert!(details.and_then(|d| d.trailer_url()).is_none());
        }
    }
}
