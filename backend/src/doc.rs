//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every request and response payload plus the
//! envelopes that wrap them, and declares the bearer-token security scheme
//! used by authenticated routes. Route handlers are external to this crate,
//! so the document carries components only. It is exported via
//! `cargo run --bin openapi-dump`.

use crate::domain::auth::{
    AuthUser, LoginRequest, LoginResponseData, RefreshRequest, RefreshResponseData, TokenType,
};
use crate::domain::comment::{Comment, CommentableType, Commenter, CreateCommentRequestBody};
use crate::domain::common::MessageResponse;
use crate::domain::customer::{CreateCustomerRequest, Customer, UpdateCustomerRequest};
use crate::domain::plan::{Plan, PlanRequest};
use crate::domain::primitives::{EmailAddress, RecordId, VisitTime};
use crate::domain::problem::{Problem, ProblemRequest};
use crate::domain::report::{
    ConfirmReportResponse, ConfirmedStatus, CreateReportRequest, PlanChange, ProblemChange,
    ReportDetail, ReportListItem, ReportScope, ReportStatus, SalespersonBasic, SalespersonDetail,
    SubmitReportResponse, SubmittedStatus, UpdateReportRequest, VisitChange,
};
use crate::domain::salesperson::{
    CreateSalespersonRequest, Manager, Salesperson, SalespersonMe, Subordinate,
    UpdateSalespersonRequest,
};
use crate::domain::validation::FieldError;
use crate::domain::visit::{CustomerBasic, CustomerDetail, VisitRecord, VisitRecordRequest, VisitResult};
use crate::inbound::http::envelope::{ErrorBody, ErrorEnvelope, ErrorStatus};
use crate::inbound::http::error::ErrorCode;
use crate::inbound::http::schemas::{PaginationMetaSchema, SuccessStatusSchema};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer-token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token issued by the login endpoint."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the daily sales-report API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Daily sales-report API",
        description = "Request and response contracts for salespeople, customers, and daily reports."
    ),
    servers(
        (url = "/api/v1", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    components(schemas(
        RecordId, EmailAddress, VisitTime, FieldError, MessageResponse,
        ErrorCode, ErrorStatus, ErrorBody, ErrorEnvelope,
        SuccessStatusSchema, PaginationMetaSchema,
        LoginRequest, RefreshRequest, TokenType, AuthUser, LoginResponseData, RefreshResponseData,
        Customer, CreateCustomerRequest, UpdateCustomerRequest,
        Manager, Salesperson, SalespersonMe, Subordinate,
        CreateSalespersonRequest, UpdateSalespersonRequest,
        VisitResult, CustomerBasic, CustomerDetail, VisitRecord, VisitRecordRequest,
        Problem, ProblemRequest, Plan, PlanRequest,
        CommentableType, Commenter, Comment, CreateCommentRequestBody,
        ReportStatus, ReportScope, SubmittedStatus, ConfirmedStatus,
        SalespersonBasic, SalespersonDetail, ReportListItem, ReportDetail,
        CreateReportRequest, UpdateReportRequest, VisitChange, ProblemChange, PlanChange,
        SubmitReportResponse, ConfirmReportResponse,
    )),
    tags(
        (name = "auth", description = "Login and token refresh"),
        (name = "customers", description = "Customer master data"),
        (name = "salespeople", description = "Salesperson master data"),
        (name = "reports", description = "Daily reports with visits, problems, and plans")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI component registration.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("ErrorEnvelope", "error")]
    #[case("ErrorBody", "details")]
    #[case("FieldError", "message")]
    #[case("CreateCustomerRequest", "postal_code")]
    #[case("CreateCommentRequestBody", "commentable_type")]
    #[case("CreateReportRequest", "report_date")]
    #[case("ReportListItem", "has_unread_comments")]
    #[case("LoginResponseData", "expires_in")]
    #[case("VisitRecord", "result_label")]
    fn openapi_schema_has_field(#[case] name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).unwrap_or_else(|| panic!("{name} schema"));
        assert_object_schema_has_field(schema, field);
    }

    #[rstest]
    fn openapi_declares_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.as_ref().expect("components");
        assert!(components.security_schemes.contains_key("BearerToken"));
    }

    #[rstest]
    fn pagination_meta_is_registered_under_crate_name() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        assert!(schemas.contains_key("pagination.PaginationMeta"));
    }

    #[rstest]
    #[case("Customer", "created_at")]
    #[case("Salesperson", "updated_at")]
    #[case("Comment", "created_at")]
    #[case("ReportListItem", "submitted_at")]
    #[case("SubmitReportResponse", "submitted_at")]
    #[case("ConfirmReportResponse", "confirmed_at")]
    fn timestamps_are_documented_as_date_time(#[case] name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).unwrap_or_else(|| panic!("{name} schema"));
        let value = serde_json::to_value(schema).expect("schema serialises");
        let property = &value["properties"][field];
        let rendered = property.to_string();
        assert!(
            rendered.contains("date-time"),
            "{name}.{field} should be a date-time, got {rendered}"
        );
    }
}
