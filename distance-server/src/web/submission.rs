//! Form submissions and the user-facing errors they can produce.

use axum::body::Bytes;
use tracing::{info, warn};

use crate::catalog::DestinationCatalog;
use crate::domain::ResultRow;
use crate::orchestrator::{Geocoder, RouteOrchestrator, RouteProvider};
use crate::upload::{UploadError, extract_origins};

/// A spreadsheet uploaded through the `file` field.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

/// What the user asked for.
#[derive(Debug, Clone)]
pub enum Submission {
    /// Many origins from the `origin` column of a spreadsheet
    Upload(UploadedFile),
    /// One origin typed into the `Origin` field
    Single(String),
    /// Neither field was filled in
    Empty,
}

impl Submission {
    /// Decide between the two form fields. A file wins over a typed origin.
    ///
    /// A file part with no name and no content is what browsers send when
    /// nothing was selected, so it counts as absent.
    pub fn from_parts(file: Option<UploadedFile>, origin: Option<String>) -> Self {
        if let Some(file) = file
            && (!file.file_name.is_empty() || !file.bytes.is_empty())
        {
            return Submission::Upload(file);
        }

        match origin {
            Some(origin) if !origin.trim().is_empty() => Submission::Single(origin),
            _ => Submission::Empty,
        }
    }

    /// The typed origin, for echoing back into the form.
    pub fn typed_origin(&self) -> &str {
        match self {
            Submission::Single(origin) => origin.trim(),
            _ => "",
        }
    }
}

/// Problems with the user's input, reported instead of a results table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Enter an origin or upload a file.")]
    MissingOrigin,

    #[error("Invalid spreadsheet file.")]
    InvalidSpreadsheet,

    #[error("Spreadsheet must contain a column named 'origin'.")]
    MissingOriginColumn,

    #[error("Invalid origin postcode.")]
    InvalidOrigin,

    #[error("No valid routes found.")]
    NoRoutes,
}

impl From<UploadError> for InputError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Unreadable(_) => InputError::InvalidSpreadsheet,
            UploadError::MissingOriginColumn { .. } => InputError::MissingOriginColumn,
        }
    }
}

/// Turn a submission into result rows.
pub async fn evaluate<G: Geocoder, R: RouteProvider>(
    orchestrator: &RouteOrchestrator<G, R>,
    catalog: &DestinationCatalog,
    submission: Submission,
) -> Result<Vec<ResultRow>, InputError> {
    match submission {
        Submission::Empty => Err(InputError::MissingOrigin),

        Submission::Single(origin) => {
            let report = orchestrator.compute_report(&[origin], catalog).await;
            if !report.unresolved_origins.is_empty() {
                return Err(InputError::InvalidOrigin);
            }
            if report.rows.is_empty() {
                return Err(InputError::NoRoutes);
            }
            Ok(report.rows)
        }

        Submission::Upload(file) => {
            if file.bytes.is_empty() {
                warn!(file_name = %file.file_name, "empty upload");
                return Err(InputError::InvalidSpreadsheet);
            }

            let origins = extract_origins(&file.bytes).map_err(|e| {
                warn!(file_name = %file.file_name, error = %e, "rejected upload");
                InputError::from(e)
            })?;
            info!(file_name = %file.file_name, origins = origins.len(), "processing upload");

            let rows = orchestrator.compute_rows(&origins, catalog).await;
            if rows.is_empty() {
                return Err(InputError::NoRoutes);
            }
            Ok(rows)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::cache::DestinationCoordinateCache;
    use crate::domain::{Coordinate, Destination, PostalCode, RouteResult};

    fn pc(s: &str) -> PostalCode {
        PostalCode::parse(s).unwrap()
    }

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    struct TableGeocoder(HashMap<&'static str, Coordinate>);

    impl Geocoder for TableGeocoder {
        async fn resolve(&self, postcode: &PostalCode) -> Option<Coordinate> {
            self.0.get(postcode.as_str()).copied()
        }
    }

    struct FixedRouter(RouteResult);

    impl RouteProvider for FixedRouter {
        async fn resolve(&self, _from: Coordinate, _to: Coordinate) -> Option<RouteResult> {
            Some(self.0)
        }
    }

    struct NoRouter;

    impl RouteProvider for NoRouter {
        async fn resolve(&self, _from: Coordinate, _to: Coordinate) -> Option<RouteResult> {
            None
        }
    }

    fn geocoder() -> TableGeocoder {
        TableGeocoder(HashMap::from([
            ("AB1 2CD", coord(57.1, -2.1)),
            ("XY9 8ZT", coord(53.8, -1.55)),
            ("E1 2PS", coord(51.52, -0.06)),
        ]))
    }

    fn catalog() -> DestinationCatalog {
        DestinationCatalog::new(vec![
            Destination::new(pc("XY9 8ZT"), "Acme BRAC", "Leeds"),
            Destination::new(pc("E1 2PS"), "Kushiara BRAC", "London"),
        ])
        .unwrap()
    }

    fn orchestrator() -> RouteOrchestrator<TableGeocoder, FixedRouter> {
        RouteOrchestrator::new(
            geocoder(),
            FixedRouter(RouteResult::from_meters_seconds(15000.0, 1230.0).unwrap()),
            DestinationCoordinateCache::new(),
        )
    }

    fn upload(contents: &'static [u8]) -> Submission {
        Submission::Upload(UploadedFile {
            file_name: "origins.csv".into(),
            bytes: Bytes::from_static(contents),
        })
    }

    #[test]
    fn file_wins_over_typed_origin() {
        let file = UploadedFile {
            file_name: "origins.csv".into(),
            bytes: Bytes::from_static(b"origin\nAB1 2CD\n"),
        };
        let submission = Submission::from_parts(Some(file), Some("E1 2PS".into()));
        assert!(matches!(submission, Submission::Upload(_)));
    }

    #[test]
    fn unselected_file_is_ignored() {
        let file = UploadedFile {
            file_name: String::new(),
            bytes: Bytes::new(),
        };
        let submission = Submission::from_parts(Some(file), Some(" E1 2PS ".into()));
        assert!(matches!(submission, Submission::Single(_)));
        assert_eq!(submission.typed_origin(), "E1 2PS");
    }

    #[test]
    fn blank_fields_are_empty() {
        assert!(matches!(
            Submission::from_parts(None, Some("   ".into())),
            Submission::Empty
        ));
        assert!(matches!(Submission::from_parts(None, None), Submission::Empty));
    }

    #[tokio::test]
    async fn empty_submission_is_rejected() {
        let result = evaluate(&orchestrator(), &catalog(), Submission::Empty).await;
        let err = result.unwrap_err();
        assert_eq!(err, InputError::MissingOrigin);
        assert_eq!(err.to_string(), "Enter an origin or upload a file.");
    }

    #[tokio::test]
    async fn single_origin_rows() {
        let rows = evaluate(&orchestrator(), &catalog(), Submission::Single("AB1 2CD".into()))
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].destination.as_str(), "XY9 8ZT");
        assert_eq!(rows[0].agency_name, "Acme BRAC");
        assert_eq!(rows[0].city, "Leeds");
        assert_eq!(rows[0].distance_km, "15.0");
        assert_eq!(rows[0].duration_min, "20.5");
    }

    #[tokio::test]
    async fn single_unknown_origin() {
        let result = evaluate(&orchestrator(), &catalog(), Submission::Single("ZZ9 9ZZ".into())).await;
        assert_eq!(result.unwrap_err(), InputError::InvalidOrigin);
    }

    #[tokio::test]
    async fn single_origin_without_routes() {
        let orchestrator =
            RouteOrchestrator::new(geocoder(), NoRouter, DestinationCoordinateCache::new());
        let result = evaluate(&orchestrator, &catalog(), Submission::Single("AB1 2CD".into())).await;
        assert_eq!(result.unwrap_err(), InputError::NoRoutes);
    }

    #[tokio::test]
    async fn upload_skips_unknown_origins() {
        let rows = evaluate(
            &orchestrator(),
            &catalog(),
            upload(b"origin\nAB1 2CD\nZZ9 9ZZ\n"),
        )
        .await
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.origin.as_str() == "AB1 2CD"));
    }

    #[tokio::test]
    async fn upload_without_origin_column() {
        let result = evaluate(&orchestrator(), &catalog(), upload(b"postcode\nAB1 2CD\n")).await;
        let err = result.unwrap_err();
        assert_eq!(err, InputError::MissingOriginColumn);
        assert_eq!(
            err.to_string(),
            "Spreadsheet must contain a column named 'origin'."
        );
    }

    #[tokio::test]
    async fn empty_upload_is_invalid() {
        let result = evaluate(&orchestrator(), &catalog(), upload(b"")).await;
        assert_eq!(result.unwrap_err(), InputError::InvalidSpreadsheet);
    }

    #[tokio::test]
    async fn upload_with_no_usable_origins() {
        let result = evaluate(&orchestrator(), &catalog(), upload(b"origin\nZZ9 9ZZ\n\n")).await;
        assert_eq!(result.unwrap_err(), InputError::NoRoutes);
    }
}
