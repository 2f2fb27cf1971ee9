//! HTTP routes for the task list.
//!
//! | Method | Path | Effect |
//! |---|---|---|
//! | GET | `/?view=` | render the filtered list |
//! | POST | `/add` | add a task from form field `title` |
//! | POST | `/toggle/{task_id}` | flip completion |
//! | POST | `/delete/{task_id}` | remove one task |
//! | POST | `/clear_done` | remove completed tasks |
//! | GET | `/health` | liveness check |
//!
//! Mutations answer `303 See Other` back to `/?view=<view>`, echoing the
//! request's `view` query value (default `all`) and carrying a flash cookie.

use crate::error::WebResult;
use crate::flash;
use crate::render::{encode_component, render_index, IndexPage};
use crate::state::AppState;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, FromRequestParts, Path, Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::request::Parts;
use axum::http::{HeaderMap, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use std::convert::Infallible;
use tasklist_core::{ping, TaskOutcome, TaskView};

const DEFAULT_VIEW: &str = "all";

/// The `view` query value of a request.
///
/// The first `view` pair wins when the parameter repeats; an unparsable query
/// string counts as no `view` at all. Extraction never rejects.
#[derive(Debug, Default)]
pub struct ViewQuery {
    view: Option<String>,
}

impl ViewQuery {
    fn from_uri(uri: &Uri) -> Self {
        let view = Query::<Vec<(String, String)>>::try_from_uri(uri)
            .ok()
            .and_then(|Query(pairs)| {
                pairs
                    .into_iter()
                    .find(|(key, _)| key == "view")
                    .map(|(_, value)| value)
            });
        Self { view }
    }

    fn raw(&self) -> &str {
        self.view.as_deref().unwrap_or(DEFAULT_VIEW)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ViewQuery {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_uri(&parts.uri))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AddForm {
    #[serde(default)]
    title: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/add", post(add_task))
        .route("/toggle/{task_id}", post(toggle_task))
        .route("/delete/{task_id}", post(delete_task))
        .route("/clear_done", post(clear_done))
        .route("/health", get(health))
        .with_state(state)
}

async fn index(
    State(state): State<AppState>,
    query: ViewQuery,
    headers: HeaderMap,
) -> WebResult<Response> {
    let view_param = query.raw().to_string();
    let view = TaskView::parse(&view_param);
    let listing = state.run(move |service| service.list(view)).await?;

    let pending = flash::take(&headers);
    let body = Html(render_index(&IndexPage {
        view_param,
        listing,
        flash: pending,
    }));

    if flash::is_present(&headers) {
        Ok(([(SET_COOKIE, flash::clear_cookie())], body).into_response())
    } else {
        Ok(body.into_response())
    }
}

async fn add_task(
    State(state): State<AppState>,
    query: ViewQuery,
    form: Result<Form<AddForm>, FormRejection>,
) -> WebResult<Response> {
    // A missing or non-form body is an empty title, rejected like any other.
    let form = form.map(|Form(form)| form).unwrap_or_default();
    let outcome = state.run(move |service| service.add(&form.title)).await?;
    Ok(redirect_to_list(&query, &outcome))
}

async fn toggle_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    query: ViewQuery,
) -> WebResult<Response> {
    let outcome = state.run(move |service| service.toggle(&task_id)).await?;
    Ok(redirect_to_list(&query, &outcome))
}

async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    query: ViewQuery,
) -> WebResult<Response> {
    let outcome = state.run(move |service| service.delete(&task_id)).await?;
    Ok(redirect_to_list(&query, &outcome))
}

async fn clear_done(
    State(state): State<AppState>,
    query: ViewQuery,
) -> WebResult<Response> {
    let outcome = state.run(|service| service.clear_done()).await?;
    Ok(redirect_to_list(&query, &outcome))
}

async fn health() -> &'static str {
    ping()
}

fn redirect_to_list(query: &ViewQuery, outcome: &TaskOutcome) -> Response {
    let location = format!("/?view={}", encode_component(query.raw()));
    (
        [(SET_COOKIE, flash::set_cookie(&outcome.message()))],
        Redirect::to(&location),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::ViewQuery;
    use axum::http::Uri;

    fn view_of(uri: &str) -> String {
        ViewQuery::from_uri(&uri.parse::<Uri>().unwrap())
            .raw()
            .to_string()
    }

    #[test]
    fn view_query_defaults_to_all_but_keeps_raw_values() {
        assert_eq!(ViewQuery::default().raw(), "all");
        assert_eq!(view_of("/"), "all");
        assert_eq!(view_of("/?other=1"), "all");
        assert_eq!(view_of("/?view="), "");
        assert_eq!(view_of("/?view=some%20view"), "some view");
    }

    #[test]
    fn repeated_view_takes_the_first_value() {
        assert_eq!(view_of("/?view=done&view=active"), "done");
        assert_eq!(view_of("/clear_done?x=1&view=active&view=all"), "active");
    }
}
