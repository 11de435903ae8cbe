//! Server rendered pages: search, author and poem.
use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use poetpedia_common::page::{
    button_class, POEM_AUTHOR_ID, POEM_LINES_ID, POEM_TITLE_ID, TOGGLE_BUTTON_ID,
};
use poetpedia_common::FAVORITE_PATH;
use serde::Deserialize;
use uuid::Uuid;

use super::Error;
use crate::application::server::{AppState, ApplicationBaseUrl};
use crate::domain::ports::secondary::PoetryError;
use crate::domain::search::{summaries, unique_authors};
use crate::domain::{AuthorSummary, FavoritePoem, Poem, PoemSummary, SearchCriteria};
use common::err_context::ErrorContextExt;

pub const NOT_FOUND_MESSAGE: &str = "Couldn't find that! Try again?";

pub async fn home() -> Redirect {
    Redirect::to("/welcome")
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub criteria: Option<String>,
    pub query: Option<String>,
}

/// GET handler for the search page.
#[tracing::instrument(
    name = "Searching poems",
    skip(state),
    fields(
        request_id = %Uuid::new_v4(),
    )
)]
pub async fn welcome(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>, Error> {
    let query = params.query.unwrap_or_default().trim().to_string();
    let criteria = params
        .criteria
        .as_deref()
        .map(str::parse::<SearchCriteria>)
        .unwrap_or(Ok(SearchCriteria::Title));

    let mut template = WelcomeTemplate {
        canonical: canonical(&state.base_url, "/welcome"),
        criteria_options: criteria_options(criteria.as_ref().ok().copied()),
        query: query.clone(),
        message: None,
        poems: Vec::new(),
        authors: Vec::new(),
    };

    match criteria {
        _ if query.is_empty() => {}
        Err(err) => tracing::info!(%err, "no search"),
        Ok(criteria) => match search(&state, criteria, &query).await {
            Ok((poems, authors)) if poems.is_empty() && authors.is_empty() => {
                template.message = Some(NOT_FOUND_MESSAGE);
            }
            Ok((poems, authors)) => {
                template.poems = poems.into_iter().map(PoemLink::from).collect();
                template.authors = authors.into_iter().map(AuthorLink::from).collect();
            }
            Err(err) => {
                tracing::warn!(error = %err, "search failed");
                template.message = Some(NOT_FOUND_MESSAGE);
            }
        },
    }

    render(&template)
}

async fn search(
    state: &AppState,
    criteria: SearchCriteria,
    query: &str,
) -> Result<(Vec<PoemSummary>, Vec<AuthorSummary>), PoetryError> {
    let found = match criteria {
        SearchCriteria::Title => (summaries(state.poetry.poems_by_title(query).await?), vec![]),
        SearchCriteria::Line => (summaries(state.poetry.poems_by_lines(query).await?), vec![]),
        SearchCriteria::Author => (vec![], unique_authors(state.poetry.poems_by_author(query).await?)),
    };
    Ok(found)
}

/// GET handler listing the poems of an author.
#[tracing::instrument(
    name = "Listing poems by author",
    skip(state),
    fields(
        request_id = %Uuid::new_v4(),
    )
)]
pub async fn author(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Html<String>, Error> {
    let poems = or_empty(state.poetry.poems_by_author(&name).await)
        .context(format!("Could not get the poems of {name}"))?;

    let template = AuthorTemplate {
        canonical: canonical(&state.base_url, &author_href(&name)),
        poems: summaries(poems).into_iter().map(PoemLink::from).collect(),
        author: name,
    };

    render(&template)
}

/// GET handler showing a poem, with the favorite toggle of the first match.
#[tracing::instrument(
    name = "Showing poem",
    skip(state),
    fields(
        request_id = %Uuid::new_v4(),
    )
)]
pub async fn poem(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Html<String>, Error> {
    let poems = or_empty(state.poetry.poems_by_title(&title).await)
        .context(format!("Could not get the poem {title}"))?;

    let button = match poems.first() {
        Some(first) => {
            let record = state
                .favorites
                .register(first)
                .await
                .context(format!("Could not register the poem {}", first.title))?;
            Some(ToggleButton::from(record))
        }
        None => None,
    };

    let template = ShowTemplate {
        canonical: canonical(&state.base_url, &poem_href(&title)),
        ids: PageIds::default(),
        poems: poems.into_iter().map(PoemView::from).collect(),
        button,
        title,
    };

    render(&template)
}

// An answer that cannot be read counts as no poems, a missing answer does not.
fn or_empty(result: Result<Vec<Poem>, PoetryError>) -> Result<Vec<Poem>, PoetryError> {
    match result {
        Err(err) if err.is_undecodable() => {
            tracing::warn!(error = %err, "ignoring PoetryDB answer");
            Ok(Vec::new())
        }
        other => other,
    }
}

fn render<T: Template>(template: &T) -> Result<Html<String>, Error> {
    let page = template.render().context("Could not render page")?;
    Ok(Html(page))
}

fn canonical(base_url: &ApplicationBaseUrl, path: &str) -> String {
    format!("{base_url}{path}")
}

fn poem_href(title: &str) -> String {
    format!("/poem/{}", utf8_percent_encode(title, NON_ALPHANUMERIC))
}

fn author_href(author: &str) -> String {
    format!("/author/{}", utf8_percent_encode(author, NON_ALPHANUMERIC))
}

struct CriteriaOption {
    value: &'static str,
    label: &'static str,
    selected: bool,
}

fn criteria_options(selected: Option<SearchCriteria>) -> Vec<CriteriaOption> {
    [
        (SearchCriteria::Title, "title", "Title"),
        (SearchCriteria::Author, "author", "Author"),
        (SearchCriteria::Line, "line", "Line"),
    ]
    .into_iter()
    .map(|(criteria, value, label)| CriteriaOption {
        value,
        label,
        selected: selected == Some(criteria),
    })
    .collect()
}

struct PoemLink {
    title: String,
    author: String,
    href: String,
    author_href: String,
}

impl From<PoemSummary> for PoemLink {
    fn from(summary: PoemSummary) -> Self {
        PoemLink {
            href: poem_href(&summary.title),
            author_href: author_href(&summary.author),
            title: summary.title,
            author: summary.author,
        }
    }
}

struct AuthorLink {
    author: String,
    href: String,
}

impl From<AuthorSummary> for AuthorLink {
    fn from(summary: AuthorSummary) -> Self {
        AuthorLink {
            href: author_href(&summary.author),
            author: summary.author,
        }
    }
}

struct PoemView {
    title: String,
    author: String,
    author_href: String,
    text: String,
}

impl From<Poem> for PoemView {
    fn from(poem: Poem) -> Self {
        PoemView {
            text: poem.text(),
            author_href: author_href(&poem.author),
            title: poem.title,
            author: poem.author,
        }
    }
}

/// Element ids the favorite toggle looks up.
struct PageIds {
    button: &'static str,
    title: &'static str,
    author: &'static str,
    lines: &'static str,
}

impl Default for PageIds {
    fn default() -> Self {
        PageIds {
            button: TOGGLE_BUTTON_ID,
            title: POEM_TITLE_ID,
            author: POEM_AUTHOR_ID,
            lines: POEM_LINES_ID,
        }
    }
}

struct ToggleButton {
    action: &'static str,
    id: String,
    favorite: bool,
    class: &'static str,
}

impl From<FavoritePoem> for ToggleButton {
    fn from(record: FavoritePoem) -> Self {
        ToggleButton {
            action: FAVORITE_PATH,
            id: record.id.to_string(),
            favorite: record.favorite,
            class: button_class(record.favorite),
        }
    }
}

#[derive(Template)]
#[template(path = "welcome.html")]
struct WelcomeTemplate {
    canonical: String,
    criteria_options: Vec<CriteriaOption>,
    query: String,
    message: Option<&'static str>,
    poems: Vec<PoemLink>,
    authors: Vec<AuthorLink>,
}

#[derive(Template)]
#[template(path = "author.html")]
struct AuthorTemplate {
    canonical: String,
    author: String,
    poems: Vec<PoemLink>,
}

#[derive(Template)]
#[template(path = "show.html")]
struct ShowTemplate {
    canonical: String,
    title: String,
    ids: PageIds,
    poems: Vec<PoemView>,
    button: Option<ToggleButton>,
}
