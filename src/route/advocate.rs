use std::sync::Arc;

use poem::web::Data;
use poem_openapi::{param::Query, payload::Json, OpenApi, Tags};
use tracing::debug;

use crate::{
    core::pagination::PageParams,
    repository::advocate::paginate_advocate,
    schema::{
        advocate::{AdvocateDetail, PaginateAdvocateResponse, PaginateAdvocateResponses},
        common::{
            InternalServerErrorResponse, PaginationInfo, DATABASE_NOT_CONFIGURED,
            FAILED_TO_FETCH_ADVOCATES,
        },
    },
    AppState,
};

#[derive(Tags)]
enum ApiAdvocateTags {
    Advocate,
}

pub struct ApiAdvocate;

#[OpenApi]
impl ApiAdvocate {
    /// Paginated advocate listing with optional multi-field search
    #[oai(path = "/advocates", method = "get", tag = "ApiAdvocateTags::Advocate")]
    async fn paginate_advocate_api(
        &self,
        /// Page number, starting at 1
        Query(page): Query<Option<String>>,
        /// Page size, at most 100
        Query(limit): Query<Option<String>>,
        /// Case-insensitive substring matched against name, city, degree,
        /// specialties and years of experience
        Query(search): Query<Option<String>>,
        state: Data<&Arc<AppState>>,
    ) -> PaginateAdvocateResponses {
        let Some(db) = state.db.as_ref() else {
            return PaginateAdvocateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.advocate",
                    "paginate_advocate_api",
                    "get database pool",
                    "DATABASE_URL is not set",
                    DATABASE_NOT_CONFIGURED,
                ),
            ));
        };

        // Begin db transaction
        let mut tx = match db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return PaginateAdvocateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.advocate",
                        "paginate_advocate_api",
                        "begin transaction",
                        &err.to_string(),
                        DATABASE_NOT_CONFIGURED,
                    ),
                ));
            }
        };

        let params = PageParams::from_query(page.as_deref(), limit.as_deref(), search.as_deref());
        debug!(
            page = params.page,
            limit = params.limit,
            search = params.search.as_deref(),
            "paginate advocates"
        );
        let (data, total) = match paginate_advocate(&mut tx, &params).await {
            Ok(val) => val,
            Err(err) => {
                return PaginateAdvocateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.advocate",
                        "paginate_advocate_api",
                        "paginate_advocate",
                        &err.to_string(),
                        FAILED_TO_FETCH_ADVOCATES,
                    ),
                ))
            }
        };

        let results: Vec<AdvocateDetail> = data.into_iter().map(AdvocateDetail::from).collect();
        PaginateAdvocateResponses::Ok(Json(PaginateAdvocateResponse {
            data: results,
            pagination: PaginationInfo::new(params.page, params.limit, total),
            search_term: params.search,
        }))
    }
}
