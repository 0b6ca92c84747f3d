//! Server-side HTML rendering for the three pages.

use std::fmt::Write;

use crate::{
    index::MovieRecord,
    models::{EnrichedRecommendation, Enrichment},
};

use super::view::{Page, ViewState};

/// Descriptions longer than this are collapsed behind a "Read more" toggle
pub const DESCRIPTION_PREVIEW_CHARS: usize = 150;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #111827; color: #e5e7eb; }
nav { display: flex; gap: 1.5rem; padding: 1rem 2rem; background: #1f2937; }
nav a { color: #9ca3af; text-decoration: none; font-weight: 600; }
nav a.active { color: #f59e0b; }
main { max-width: 1100px; margin: 0 auto; padding: 2rem; }
a { color: #fbbf24; }
form { display: flex; gap: .75rem; flex-wrap: wrap; align-items: center; margin-bottom: 1rem; }
input, select, button { padding: .5rem .75rem; border-radius: 6px; border: 1px solid #374151; background: #111827; color: inherit; }
.titles { columns: 2; list-style: none; padding: 0; }
.grid { display: grid; grid-template-columns: repeat(3, 1fr); gap: 1.25rem; }
.card { background: #1f2937; border-radius: 10px; padding: 1rem; }
.card img { width: 100%; border-radius: 6px; }
.poster-missing { height: 240px; display: flex; align-items: center; justify-content: center; background: #374151; border-radius: 6px; }
.meta { color: #9ca3af; font-size: .85rem; }
.notice { padding: .75rem 1rem; background: #7f1d1d; border-radius: 6px; }
"#;

/// Escapes text for use in element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Link to the recommendations page for `title`
pub fn movie_link(title: &str, count: usize) -> String {
    format!(
        "/recommendations?movie={}&count={}",
        urlencoding::encode(title),
        count
    )
}

fn layout(active: Page, body: &str) -> String {
    let mut nav = String::new();
    for page in Page::ALL {
        let class = if page == active { " class=\"active\"" } else { "" };
        let _ = write!(nav, "<a href=\"{}\"{}>{}</a>", page.path(), class, page.label());
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Movie Recommender - {}</title>\n<style>{}</style>\n</head>\n\
         <body>\n<nav>{}</nav>\n<main>\n{}\n</main>\n</body>\n</html>\n",
        active.label(),
        STYLE,
        nav,
        body
    )
}

pub fn home(movie_count: usize, enrichment_enabled: bool, default_count: usize) -> String {
    let enrichment = if enrichment_enabled {
        "Each result comes with a poster, a synopsis and a trailer link from The Movie Database."
    } else {
        "Movie descriptions are turned off on this server."
    };

    let body = format!(
        "<h1>Movie Recommendation System</h1>\n\
         <p>Pick a movie you like and get titles with similar names and genres \
         from a catalog of {movie_count} movies.</p>\n\
         <p>{enrichment}</p>\n\
         <p><a href=\"/recommendations?count={default_count}\">Find recommendations</a> \
         or <a href=\"/recommendations?random=true&amp;count={default_count}\">surprise me</a>.</p>"
    );

    layout(Page::Home, &body)
}

pub fn about() -> String {
    let body = "<h1>About</h1>\n\
        <p>Every movie is described by its title and genre tags. Those words are weighted \
        with TF-IDF, so terms shared by few movies count more than common ones, and \
        English stop words are ignored.</p>\n\
        <p>Movies are compared with cosine similarity over those weights. The full \
        similarity table is computed once when the server starts; a recommendation is a \
        lookup and a sort.</p>\n\
        <p>Descriptions, posters and trailers come from \
        <a href=\"https://www.themoviedb.org/\">The Movie Database (TMDB)</a>. \
        This product uses the TMDB API but is not endorsed or certified by TMDB.</p>";

    layout(Page::About, body)
}

/// Everything the recommendations page shows
pub struct RecommendationsPage<'a> {
    pub view: &'a ViewState,
    pub matches: Vec<&'a MovieRecord>,
    /// `None` when nothing is selected yet
    pub results: Option<Vec<EnrichedRecommendation>>,
    pub max_count: usize,
}

pub fn recommendations(page: &RecommendationsPage<'_>) -> String {
    let view = page.view;
    let mut body = String::from("<h1>Recommendations</h1>\n");

    // search + count form
    let mut options = String::new();
    for n in 1..=page.max_count {
        let selected = if n == view.count { " selected" } else { "" };
        let _ = write!(options, "<option value=\"{n}\"{selected}>{n}</option>");
    }
    let _ = write!(
        body,
        "<form method=\"get\" action=\"/recommendations\">\
         <input type=\"search\" name=\"q\" placeholder=\"Search titles\" value=\"{}\">\
         <label>Results <select name=\"count\">{}</select></label>\
         <button type=\"submit\">Search</button>\
         <a href=\"/recommendations?random=true&amp;count={}\">Surprise me</a>\
         </form>\n",
        escape(&view.query),
        options,
        view.count
    );

    if !view.query.is_empty() {
        if page.matches.is_empty() {
            let _ = writeln!(
                body,
                "<p class=\"notice\">No titles contain \"{}\".</p>",
                escape(&view.query)
            );
        } else {
            body.push_str("<ul class=\"titles\">");
            for movie in &page.matches {
                let _ = write!(
                    body,
                    "<li><a href=\"{}\">{}</a></li>",
                    escape(&movie_link(&movie.title, view.count)),
                    escape(&movie.title)
                );
            }
            body.push_str("</ul>\n");
        }
    }

    if let (Some(selected), Some(results)) = (&view.selected, &page.results) {
        if results.is_empty() {
            let _ = writeln!(
                body,
                "<p class=\"notice\">Movie not found: \"{}\". Try searching for it above.</p>",
                escape(selected)
            );
        } else {
            let heading = if view.surprise { "Surprise pick" } else { "Because you chose" };
            let _ = writeln!(body, "<h2>{} {}</h2>", heading, escape(selected));
            body.push_str("<div class=\"grid\">\n");
            for result in results {
                body.push_str(&card(result, view.count));
            }
            body.push_str("</div>\n");
        }
    }

    layout(Page::Recommendations, &body)
}

fn card(result: &EnrichedRecommendation, count: usize) -> String {
    let recommendation = &result.recommendation;
    let details = result.enrichment.as_ref().and_then(Enrichment::details);
    let description = result
        .enrichment
        .as_ref()
        .map(Enrichment::description)
        .unwrap_or_default();

    let poster = match details.and_then(|d| d.poster_url()) {
        Some(url) => format!(
            "<img src=\"{}\" alt=\"{} poster\">",
            escape(&url),
            escape(&recommendation.title)
        ),
        None => "<div class=\"poster-missing\">No poster</div>".to_string(),
    };

    let mut links = String::new();
    if let Some(url) = details.and_then(|d| d.page_url()) {
        let _ = write!(links, "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">TMDB</a> ", escape(&url));
    }
    if let Some(url) = details.and_then(|d| d.trailer_url()) {
        let _ = write!(links, "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">Trailer</a>", escape(&url));
    }

    format!(
        "<div class=\"card\">{}<h3>{}. <a href=\"{}\">{}</a></h3>\
         <p class=\"meta\">{} &middot; similarity {:.2}</p>{}<p>{}</p></div>\n",
        poster,
        recommendation.rank,
        escape(&movie_link(&recommendation.title, count)),
        escape(&recommendation.title),
        escape(&recommendation.genres.replace('|', ", ")),
        recommendation.score,
        description_block(description),
        links
    )
}

fn description_block(description: &str) -> String {
    if description.chars().count() <= DESCRIPTION_PREVIEW_CHARS {
        return format!("<p>{}</p>", escape(description));
    }

    let preview: String = description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
    format!(
        "<details><summary>{}&hellip; Read more</summary><p>{}</p></details>",
        escape(preview.trim_end()),
        escape(description)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MovieDetails, Recommendation, UnavailableReason};
    use crate::web::view::ViewAction;
    use chrono::Utc;

    fn result(enrichment: Enrichment) -> EnrichedRecommendation {
        EnrichedRecommendation {
            recommendation: Recommendation {
                rank: 1,
                title: "Toy Story 2 (1999)".to_string(),
                genres: "Adventure|Animation".to_string(),
                score: 0.81,
            },
            enrichment: Some(enrichment),
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape("<Tom & Jerry's \"Movie\">"),
            "&lt;Tom &amp; Jerry&#39;s &quot;Movie&quot;&gt;"
        );
    }

    #[test]
    fn test_movie_link_encodes_title() {
        assert_eq!(
            movie_link("Toy Story (1995)", 5),
            "/recommendations?movie=Toy%20Story%20%281995%29&count=5"
        );
    }

    #[test]
    fn test_layout_marks_active_page() {
        let html = about();
        assert!(html.contains("<a href=\"/about\" class=\"active\">About</a>"));
        assert!(html.contains("<a href=\"/\">Home</a>"));
    }

    #[test]
    fn test_long_description_is_collapsed() {
        let long = "word ".repeat(60);
        let html = description_block(&long);
        assert!(html.starts_with("<details>"));
        assert!(html.contains("Read more"));

        let short = description_block("Short.");
        assert_eq!(short, "<p>Short.</p>");
    }

    #[test]
    fn test_card_with_details() {
        let details = MovieDetails {
            description: "Woody is stolen.".to_string(),
            poster_path: Some("/p.jpg".to_string()),
            genre_names: vec![],
            external_id: Some(863),
            trailer_key: Some("xyz".to_string()),
            fetched_at: Utc::now(),
        };
        let html = card(&result(Enrichment::Available(details)), 5);
        assert!(html.contains("https://image.tmdb.org/t/p/w500/p.jpg"));
        assert!(html.contains("https://www.themoviedb.org/movie/863"));
        assert!(html.contains("https://www.youtube.com/watch?v=xyz"));
        assert!(html.contains("Adventure, Animation"));
    }

    #[test]
    fn test_card_without_details_uses_placeholder() {
        let html = card(&result(Enrichment::unavailable(UnavailableReason::Unreachable(
            "timeout".to_string(),
        ))), 5);
        assert!(html.contains("No poster"));
        assert!(html.contains("API limit reached"));
        assert!(!html.contains("Trailer"));
    }

    #[test]
    fn test_not_found_message() {
        let view = ViewState::new(5).apply(ViewAction::Select("Nope (2040)".to_string()));
        let html = recommendations(&RecommendationsPage {
            view: &view,
            matches: vec![],
            results: Some(vec![]),
            max_count: 10,
        });
        assert!(html.contains("Movie not found"));
        assert!(html.contains("Nope (2040)"));
    }
}
