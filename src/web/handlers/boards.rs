//! Board, topic and post handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};

use crate::board::{BoardService, NewReply, NewTopic};
use crate::web::csrf::CsrfToken;
use crate::web::error::WebError;
use crate::web::forms::{form_or_default, FormErrors, NewTopicForm, ReplyForm};
use crate::web::middleware::CurrentUser;
use crate::web::templates::{
    BoardRow, HomeTemplate, NewTopicTemplate, PageContext, PostRow, ReplyTopicTemplate,
    TopicPostsTemplate, TopicRow, TopicsTemplate,
};
use crate::BoardsError;

use super::{parse_id, render, AppState};

/// Form-wide error for anonymous topic submissions.
pub const LOGIN_REQUIRED_TOPIC: &str = "You must be logged in to start a topic.";

/// Form-wide error for anonymous replies.
pub const LOGIN_REQUIRED_REPLY: &str = "You must be logged in to reply.";

/// GET / - List all boards.
pub async fn home(
    State(state): State<Arc<AppState>>,
    csrf: CsrfToken,
    user: CurrentUser,
) -> Result<Response, WebError> {
    let boards = BoardService::new(&state.db)
        .list_boards()
        .await?
        .into_iter()
        .map(|b| BoardRow::from_summary(&state, b))
        .collect();

    let template = HomeTemplate {
        page: PageContext::new(&state, user.username(), &csrf.token),
        boards,
    };
    Ok((csrf.jar, render(&template)?).into_response())
}

/// GET /boards/:pk/ - List a board's topics.
pub async fn board_topics(
    State(state): State<Arc<AppState>>,
    Path(pk): Path<String>,
    csrf: CsrfToken,
    user: CurrentUser,
) -> Result<Response, WebError> {
    let service = BoardService::new(&state.db);
    let board = service.get_board(parse_id(&pk)?).await?;
    let topics = service
        .list_topics(board.id)
        .await?
        .into_iter()
        .map(|t| TopicRow::from_summary(&state, t))
        .collect();

    let template = TopicsTemplate {
        page: PageContext::new(&state, user.username(), &csrf.token),
        board,
        topics,
    };
    Ok((csrf.jar, render(&template)?).into_response())
}

/// GET /boards/:pk/new/ - Show the new-topic form.
pub async fn new_topic(
    State(state): State<Arc<AppState>>,
    Path(pk): Path<String>,
    csrf: CsrfToken,
    user: CurrentUser,
) -> Result<Response, WebError> {
    let board = BoardService::new(&state.db)
        .get_board(parse_id(&pk)?)
        .await?;

    let template = NewTopicTemplate {
        page: PageContext::new(&state, user.username(), &csrf.token),
        board,
        form: NewTopicForm::default(),
        errors: FormErrors::new(),
    };
    Ok((csrf.jar, render(&template)?).into_response())
}

/// POST /boards/:pk/new/ - Start a topic with its opening post.
pub async fn new_topic_submit(
    State(state): State<Arc<AppState>>,
    Path(pk): Path<String>,
    csrf: CsrfToken,
    user: CurrentUser,
    form: Result<Form<NewTopicForm>, FormRejection>,
) -> Result<Response, WebError> {
    let form = form_or_default(form);
    let service = BoardService::new(&state.db);
    let board = service.get_board(parse_id(&pk)?).await?;
    csrf.verify(&form.csrfmiddlewaretoken)?;

    let mut errors = FormErrors::validate(&form);
    if user.0.is_none() {
        errors.add_non_field(LOGIN_REQUIRED_TOPIC);
    }

    if let (true, Some(starter)) = (errors.is_empty(), user.0.as_ref()) {
        let new_topic = NewTopic::new(board.id, starter.id, &form.subject, &form.message);
        match service.start_topic(&new_topic).await {
            Ok(_) => {
                return Ok(
                    (csrf.jar, Redirect::to(&format!("/boards/{}/", board.id))).into_response(),
                )
            }
            Err(BoardsError::Validation(message)) => errors.add_non_field(message),
            Err(e) => return Err(e.into()),
        }
    }

    let template = NewTopicTemplate {
        page: PageContext::new(&state, user.username(), &csrf.token),
        board,
        form: NewTopicForm {
            csrfmiddlewaretoken: String::new(),
            ..form
        },
        errors,
    };
    Ok((csrf.jar, render(&template)?).into_response())
}

/// GET /boards/:pk/topics/:topic_pk/ - Show a topic's posts.
pub async fn topic_posts(
    State(state): State<Arc<AppState>>,
    Path((pk, topic_pk)): Path<(String, String)>,
    csrf: CsrfToken,
    user: CurrentUser,
) -> Result<Response, WebError> {
    let service = BoardService::new(&state.db);
    let (board, topic) = service
        .get_topic(parse_id(&pk)?, parse_id(&topic_pk)?)
        .await?;
    let posts = service
        .list_posts(topic.id)
        .await?
        .into_iter()
        .map(|p| PostRow::from_post(&state, p))
        .collect();

    let template = TopicPostsTemplate {
        page: PageContext::new(&state, user.username(), &csrf.token),
        board,
        topic,
        posts,
    };
    Ok((csrf.jar, render(&template)?).into_response())
}

async fn reply_page(
    state: &AppState,
    csrf: CsrfToken,
    user: &CurrentUser,
    board_id: i64,
    topic_id: i64,
    form: ReplyForm,
    errors: FormErrors,
) -> Result<Response, WebError> {
    let service = BoardService::new(&state.db);
    let (board, topic) = service.get_topic(board_id, topic_id).await?;
    let posts = service
        .list_posts(topic.id)
        .await?
        .into_iter()
        .rev()
        .map(|p| PostRow::from_post(state, p))
        .collect();

    let template = ReplyTopicTemplate {
        page: PageContext::new(state, user.username(), &csrf.token),
        board,
        topic,
        form,
        errors,
        posts,
    };
    Ok((csrf.jar, render(&template)?).into_response())
}

/// GET /boards/:pk/topics/:topic_pk/reply/ - Show the reply form.
pub async fn reply_topic(
    State(state): State<Arc<AppState>>,
    Path((pk, topic_pk)): Path<(String, String)>,
    csrf: CsrfToken,
    user: CurrentUser,
) -> Result<Response, WebError> {
    let (board_id, topic_id) = (parse_id(&pk)?, parse_id(&topic_pk)?);
    reply_page(
        &state,
        csrf,
        &user,
        board_id,
        topic_id,
        ReplyForm::default(),
        FormErrors::new(),
    )
    .await
}

/// POST /boards/:pk/topics/:topic_pk/reply/ - Post a reply.
pub async fn reply_topic_submit(
    State(state): State<Arc<AppState>>,
    Path((pk, topic_pk)): Path<(String, String)>,
    csrf: CsrfToken,
    user: CurrentUser,
    form: Result<Form<ReplyForm>, FormRejection>,
) -> Result<Response, WebError> {
    let form = form_or_default(form);
    let service = BoardService::new(&state.db);
    let (board, topic) = service
        .get_topic(parse_id(&pk)?, parse_id(&topic_pk)?)
        .await?;
    csrf.verify(&form.csrfmiddlewaretoken)?;

    let mut errors = FormErrors::validate(&form);
    if user.0.is_none() {
        errors.add_non_field(LOGIN_REQUIRED_REPLY);
    }

    if let (true, Some(author)) = (errors.is_empty(), user.0.as_ref()) {
        match service
            .reply(&NewReply::new(topic.id, author.id, &form.message))
            .await
        {
            Ok(_) => {
                let url = format!("/boards/{}/topics/{}/", board.id, topic.id);
                return Ok((csrf.jar, Redirect::to(&url)).into_response());
            }
            Err(BoardsError::Validation(message)) => errors.add_non_field(message),
            Err(e) => return Err(e.into()),
        }
    }

    let form = ReplyForm {
        csrfmiddlewaretoken: String::new(),
        ..form
    };
    reply_page(&state, csrf, &user, board.id, topic.id, form, errors).await
}
