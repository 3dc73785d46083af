//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, reports, rpc};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lectern API",
        version = "1.0.0",
        description = "Library lending reports over REST and RPC-style messages",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Reports
        reports::most_lending,
        reports::book_availability,
        reports::top_lenders,
        reports::user_lending_history,
        reports::related_books,
        reports::reading_rate,
        // RPC
        rpc::get_most_borrowed_books,
        rpc::get_book_availability,
        rpc::get_reading_rate,
        rpc::get_top_borrowers,
        rpc::get_user_borrow_history,
        rpc::get_related_books,
    ),
    components(
        schemas(
            // Health
            health::HealthResponse,
            // Reports
            crate::models::reports::BookAvailabilityResponse,
            crate::models::reports::BookReadingRateResponse,
            crate::models::reports::MostLendingBooksResponse,
            crate::models::reports::TopLendingUsersResponse,
            crate::models::reports::LendingBooksResponse,
            // RPC messages
            rpc::MostBorrowedBooksRequest,
            rpc::MostBorrowedBook,
            rpc::MostBorrowedBooksResponse,
            rpc::BookAvailabilityRequest,
            rpc::BookAvailabilityMessage,
            rpc::ReadingRateRequest,
            rpc::ReadingRateMessage,
            rpc::TopBorrowersRequest,
            rpc::TopBorrower,
            rpc::TopBorrowersResponse,
            rpc::UserBorrowHistoryRequest,
            rpc::UserBorrowRecord,
            rpc::UserBorrowHistoryResponse,
            rpc::RelatedBooksRequest,
            rpc::RelatedBook,
            rpc::RelatedBooksResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "reports", description = "Lending reports"),
        (name = "rpc", description = "RPC-style message surface")
    )
)]
pub struct ApiDoc;

/// Swagger UI router serving the generated document
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
