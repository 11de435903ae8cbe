use poetpedia_common::page::{
    DATA_FAVORITE, DATA_ID, FAVORITE_CLASS, NOT_FAVORITE_CLASS, POEM_AUTHOR_ID,
    POEM_LINES_ID, POEM_TITLE_ID, TOGGLE_BUTTON_ID,
};
use poetpedia_common::{PoemFavoriteRequest, PoemId};
use std::cell::Cell;
use std::fmt;
use std::future::Future;
use std::rc::Rc;

use crate::client::{Error as ClientError, FavoriteClient};
use crate::dom::{Document, Element, Event};

/// Ids of the elements the toggle binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleSelectors {
    pub button: String,
    pub title: String,
    pub author: String,
    pub lines: String,
}

impl Default for ToggleSelectors {
    fn default() -> Self {
        ToggleSelectors {
            button: TOGGLE_BUTTON_ID.to_string(),
            title: POEM_TITLE_ID.to_string(),
            author: POEM_AUTHOR_ID.to_string(),
            lines: POEM_LINES_ID.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The server accepted the change; the button now shows `favorite`.
    Toggled { favorite: bool },
    /// A previous click is still waiting for the server; this one was ignored.
    Busy,
}

#[derive(Debug)]
pub enum Error {
    MissingElement { context: String },
    MissingAttribute { context: String },
    InvalidAttribute { context: String, value: String },
    MissingAction { context: String },
    Client { context: String, source: ClientError },
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingElement { context } => write!(fmt, "Missing element: {context}"),
            Error::MissingAttribute { context } => write!(fmt, "Missing attribute: {context}"),
            Error::InvalidAttribute { context, value } => {
                write!(fmt, "Invalid attribute: {context} | '{value}'")
            }
            Error::MissingAction { context } => write!(fmt, "Missing form action: {context}"),
            Error::Client { context, source } => write!(fmt, "Client: {context} | {source}"),
        }
    }
}

impl std::error::Error for Error {}

/// Shows `is_favorite` on the button and stores it for the next click.
pub fn toggle_button_appearance<E: Element>(button: &E, is_favorite: bool) {
    if is_favorite {
        button.remove_class(NOT_FAVORITE_CLASS);
        button.add_class(FAVORITE_CLASS);
    } else {
        button.remove_class(FAVORITE_CLASS);
        button.add_class(NOT_FAVORITE_CLASS);
    }
    button.set_attribute(DATA_FAVORITE, if is_favorite { "true" } else { "false" });
}

/// The favorite button of a poem page, bound to its poem and form.
pub struct FavoriteToggle<E: Element, C: FavoriteClient> {
    button: E,
    title: E,
    author: E,
    lines: E,
    form: E,
    client: Rc<C>,
    in_flight: Rc<Cell<bool>>,
}

impl<E, C> FavoriteToggle<E, C>
where
    E: Element + 'static,
    C: FavoriteClient + 'static,
{
    /// Binds to the elements of a loaded document.
    ///
    /// Fails if the button, one of the poem elements, or the form around the
    /// button is missing.
    pub fn init<D>(document: &D, client: C, selectors: &ToggleSelectors) -> Result<Self, Error>
    where
        D: Document<Element = E>,
    {
        let find = |id: &str| {
            document
                .element_by_id(id)
                .ok_or_else(|| Error::MissingElement {
                    context: format!("No element with id '{id}'"),
                })
        };
        let button = find(&selectors.button)?;
        let form = button.closest("form").ok_or_else(|| Error::MissingElement {
            context: format!("No form around '{}'", selectors.button),
        })?;

        Ok(FavoriteToggle {
            title: find(&selectors.title)?,
            author: find(&selectors.author)?,
            lines: find(&selectors.lines)?,
            button,
            form,
            client: Rc::new(client),
            in_flight: Rc::new(Cell::new(false)),
        })
    }

    pub fn button(&self) -> &E {
        &self.button
    }

    /// Click handler of the button.
    ///
    /// The default action is suppressed and the page state is read before
    /// returning: browsers ignore `prevent_default` once dispatch is over, and
    /// the request must carry the values shown at click time. The appearance
    /// changes once the returned future sees the server accept the request.
    pub fn on_toggle_click<Ev: Event>(
        &self,
        event: &Ev,
    ) -> impl Future<Output = Result<ToggleOutcome, Error>> + 'static {
        event.prevent_default();

        let prepared = self.prepare();
        let button = self.button.clone();
        let client = Rc::clone(&self.client);

        async move {
            let Some(Prepared {
                url,
                request,
                is_favorite,
                _guard,
            }) = prepared?
            else {
                return Ok(ToggleOutcome::Busy);
            };

            let favorite = !is_favorite;
            client
                .post_favorite(&url, &request)
                .await
                .map_err(|err| Error::Client {
                    context: format!("Could not toggle favorite of poem {}", request.id),
                    source: err,
                })
                .map_err(|err| {
                    tracing::warn!(error = %err, "favorite toggle failed");
                    err
                })?;

            toggle_button_appearance(&button, favorite);
            tracing::info!(id = %request.id, favorite, "favorite toggled");
            Ok(ToggleOutcome::Toggled { favorite })
        }
    }

    fn prepare(&self) -> Result<Option<Prepared>, Error> {
        if self.in_flight.get() {
            tracing::debug!("favorite toggle already in flight");
            return Ok(None);
        }
        let is_favorite = self.favorite_state()?;
        let request = self.poem_request()?;
        let url = self.action()?;
        tracing::debug!(?request, %url, "favorite toggle requested");
        Ok(Some(Prepared {
            url,
            request,
            is_favorite,
            _guard: InFlightGuard::new(&self.in_flight),
        }))
    }

    /// Current state, as stored on the button.
    pub fn favorite_state(&self) -> Result<bool, Error> {
        let value = self
            .button
            .attribute(DATA_FAVORITE)
            .ok_or_else(|| Error::MissingAttribute {
                context: format!("toggle button has no {DATA_FAVORITE}"),
            })?;
        parse_favorite(&value).ok_or_else(|| Error::InvalidAttribute {
            context: format!("{DATA_FAVORITE} is neither true nor false"),
            value,
        })
    }

    /// Request built from what the page currently shows.
    pub fn poem_request(&self) -> Result<PoemFavoriteRequest, Error> {
        let id = self
            .button
            .attribute(DATA_ID)
            .ok_or_else(|| Error::MissingAttribute {
                context: format!("toggle button has no {DATA_ID}"),
            })
            .map(PoemId::new)?;
        if id.is_empty() {
            return Err(Error::InvalidAttribute {
                context: format!("{DATA_ID} is empty"),
                value: id.to_string(),
            });
        }
        Ok(PoemFavoriteRequest {
            title: self.title.text_content(),
            author: self.author.text_content(),
            lines: self.lines.text_content(),
            id,
        })
    }

    fn action(&self) -> Result<String, Error> {
        self.form
            .attribute("action")
            .filter(|action| !action.trim().is_empty())
            .ok_or_else(|| Error::MissingAction {
                context: "the form around the toggle button has no action".to_string(),
            })
    }
}

fn parse_favorite(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

struct Prepared {
    url: String,
    request: PoemFavoriteRequest,
    is_favorite: bool,
    _guard: InFlightGuard,
}

/// Marks a toggle as in flight until dropped, even if the future is abandoned.
struct InFlightGuard(Rc<Cell<bool>>);

impl InFlightGuard {
    fn new(flag: &Rc<Cell<bool>>) -> Self {
        flag.set(true);
        InFlightGuard(Rc::clone(flag))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.set(false);
    }
}
