//! # REST API for the Service Catalog

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::ServiceCatalogResponse;
use tracing::info;

use crate::domain::models::SalonService;
use crate::io::rest::mappers::appointment_mapper::AppointmentMapper;

/// The fixed catalog, in booking-form order
pub async fn list_services() -> impl IntoResponse {
    info!("GET /api/services");

    let response = ServiceCatalogResponse {
        services: SalonService::CATALOG
            .into_iter()
            .map(AppointmentMapper::service_to_dto)
            .collect(),
        default_service: SalonService::default_selection().label(),
    };

    (StatusCode::OK, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_list_services_returns_full_catalog() {
        let response = list_services().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let catalog: ServiceCatalogResponse = serde_json::from_slice(&bytes).unwrap();

        let labels: Vec<_> = catalog.services.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Haircut - $30", "Hair Coloring - $80", "Manicure - $25", "Pedicure - $35", "Facial - $50"]
        );
        assert_eq!(catalog.default_service, "Haircut - $30");
    }
}
