use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

use crate::{
    api::AppState,
    services::{recommendations, title_search},
};

use super::{
    render::{self, RecommendationsPage},
    view::{Page, ViewAction, ViewState},
};

/// Maximum number of titles listed under the search box
const TITLE_MATCH_LIMIT: usize = 50;

#[derive(Debug, Default, Deserialize)]
pub struct RecommendationsQuery {
    /// Substring filter over titles
    pub q: Option<String>,
    /// Title to recommend for
    pub movie: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub count: Option<usize>,
    /// Pick a random title instead of `movie`
    #[serde(default, deserialize_with = "lenient")]
    pub random: Option<bool>,
}

/// Form values typed into the page: anything unparsable counts as absent
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.trim().parse().ok()))
}

impl RecommendationsQuery {
    /// Turns query parameters into view transitions, in the order a user
    /// would perform them on the page.
    fn actions(&self, state: &AppState) -> Vec<ViewAction> {
        let mut actions = vec![ViewAction::Navigate(Page::Recommendations)];

        if let Some(query) = &self.q {
            actions.push(ViewAction::Search(query.clone()));
        }
        if let Some(count) = self.count {
            actions.push(ViewAction::SetCount {
                count,
                max: state.max_count,
            });
        }

        if self.random.unwrap_or(false) {
            let mut rng = rand::rng();
            if let Some(movie) = title_search::random_movie(&state.index, &mut rng) {
                actions.push(ViewAction::Random(movie.title.clone()));
            }
        } else if let Some(movie) = &self.movie {
            actions.push(ViewAction::Select(movie.clone()));
        }

        actions
    }
}

pub async fn home(State(state): State<AppState>) -> Html<String> {
    Html(render::home(
        state.index.len(),
        state.enricher.is_enabled(),
        state.default_count,
    ))
}

pub async fn about() -> Html<String> {
    Html(render::about())
}

pub async fn recommendations(
    State(state): State<AppState>,
    Query(params): Query<RecommendationsQuery>,
) -> Html<String> {
    let view = ViewState::new(state.default_count).apply_all(params.actions(&state));

    let matches = if view.query.is_empty() {
        Vec::new()
    } else {
        title_search::search_titles(&state.index, &view.query, TITLE_MATCH_LIMIT)
    };

    let results = match &view.selected {
        Some(title) => Some(
            recommendations::recommend_enriched(&state.index, &state.enricher, title, view.count)
                .await,
        ),
        None => None,
    };

    tracing::debug!(
        query = %view.query,
        selected = ?view.selected,
        count = view.count,
        matches = matches.len(),
        "Rendering recommendations page"
    );

    Html(render::recommendations(&RecommendationsPage {
        view: &view,
        matches,
        results,
        max_count: state.max_count,
    }))
}
