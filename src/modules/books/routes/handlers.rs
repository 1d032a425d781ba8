use axum::extract::{
    rejection::{JsonRejection, PathRejection},
    Path, State,
};
use axum::Json;
use bookshelf_http::{ApiResponse, AppError};

use crate::modules::books::models::{Book, NewBook};
use crate::modules::books::store::SharedStore;

const ID_MISSING_ON_GET: &str = "id cannot be empty";
const ID_MISSING_ON_DELETE: &str = "id not given";

/// `POST /api/createbook`
pub async fn create_book(
    State(store): State<SharedStore>,
    payload: Result<Json<NewBook>, JsonRejection>,
) -> Result<ApiResponse<()>, AppError> {
    let Json(book) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection, "create book body rejected");
        AppError::unprocessable("request failed")
    })?;

    let book = store.create(book).await.map_err(|err| {
        tracing::warn!(error = %err, "insert failed");
        AppError::bad_request("couldn't create book")
    })?;

    tracing::info!(book_id = book.id, "book created");
    Ok(ApiResponse::message("book added"))
}

/// `GET /api/getbooks`
pub async fn list_books(
    State(store): State<SharedStore>,
) -> Result<ApiResponse<Vec<Book>>, AppError> {
    let books = store.list().await.map_err(|err| {
        tracing::warn!(error = %err, "list failed");
        AppError::bad_request("couldn't get the books")
    })?;

    Ok(ApiResponse::with_data("book fetched successfully", books))
}

/// `GET /api/getbook/{id}`
pub async fn get_book(
    State(store): State<SharedStore>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Result<ApiResponse<Book>, AppError> {
    const FAILED: &str = "could not get books by id";

    let Path(raw_id) = raw_id.map_err(|rejection| path_rejected(rejection, FAILED))?;
    let id = parse_id(&raw_id, ID_MISSING_ON_GET, FAILED)?;

    match store.get(id).await {
        Ok(Some(book)) => Ok(ApiResponse::with_data("id fetched successfully", book)),
        Ok(None) => {
            tracing::debug!(book_id = id, "no such book");
            Err(AppError::bad_request(FAILED))
        }
        Err(err) => {
            tracing::warn!(book_id = id, error = %err, "lookup failed");
            Err(AppError::bad_request(FAILED))
        }
    }
}

/// `GET /api/getbook` with no id segment
pub async fn get_book_without_id() -> AppError {
    AppError::bad_request(ID_MISSING_ON_GET)
}

/// `DELETE /api/deletebook/{id}`
pub async fn delete_book(
    State(store): State<SharedStore>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Result<ApiResponse<()>, AppError> {
    const FAILED: &str = "could not delete book";

    let Path(raw_id) = raw_id.map_err(|rejection| path_rejected(rejection, FAILED))?;
    let id = parse_id(&raw_id, ID_MISSING_ON_DELETE, FAILED)?;

    match store.delete(id).await {
        Ok(0) => {
            tracing::debug!(book_id = id, "nothing to delete");
            Err(AppError::bad_request(FAILED))
        }
        Ok(_) => {
            tracing::info!(book_id = id, "book deleted");
            Ok(ApiResponse::message("delete successful"))
        }
        Err(err) => {
            tracing::warn!(book_id = id, error = %err, "delete failed");
            Err(AppError::bad_request(FAILED))
        }
    }
}

/// `DELETE /api/deletebook` with no id segment
pub async fn delete_book_without_id() -> AppError {
    AppError::bad_request(ID_MISSING_ON_DELETE)
}

/// Id segment that does not decode to a string, e.g. invalid UTF-8
fn path_rejected(rejection: PathRejection, message: &'static str) -> AppError {
    tracing::debug!(error = %rejection, "id segment rejected");
    AppError::bad_request(message)
}

/// Blank ids report `missing`; anything that is not an integer reports `invalid`.
fn parse_id(raw: &str, missing: &'static str, invalid: &'static str) -> Result<i64, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::bad_request(missing));
    }

    raw.parse::<i64>().map_err(|_| {
        tracing::debug!(id = raw, "id is not an integer");
        AppError::bad_request(invalid)
    })
}
