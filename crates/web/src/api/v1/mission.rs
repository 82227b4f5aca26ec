use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Path, State},
    http::{Method, StatusCode},
    routing::{delete, get, on, post},
    Json, Router,
};
use mission::{
    snapshot::{MissionSnapshot, WaypointListing},
    EditorEvent, SequenceEditor,
};
use model::{
    coordinate::Coordinate,
    polygon::{ImportedPolygon, PendingPolygon, Side},
    waypoint::Waypoint,
};
use serde::Deserialize;
use tokio::sync::Mutex;
use utility::id::Id;

use crate::{
    common::{
        route_not_found, schema, RouteErrorResponse, RouteResult, VecResponse,
        METHOD_FILTER_ALL,
    },
    WebState,
};

type SnapshotResult = RouteResult<Json<MissionSnapshot>>;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/", get(get_snapshot))
        .route("/schema", get(schema::<MissionSnapshot>))
        .route("/waypoints", get(get_waypoints))
        .route("/waypoints/schema", get(schema::<Waypoint>))
        .route("/waypoints/:id", delete(remove_waypoint))
        .route("/polygons", get(get_imported_polygons))
        .route("/polygons/pending", get(get_pending_polygon))
        .route("/polygons/pending/import", post(import_pending_polygon))
        .route("/draw/line", post(begin_line_draw))
        .route("/draw/polygon", post(request_insert_polygon))
        .route("/draw/coordinates", post(add_coordinate))
        .route("/draw/finish", post(finish_drawing))
        .route("/draw/cancel", post(cancel_drawing))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InsertPolygonDto {
    waypoint_id: Id<Waypoint>,
    side: Side,
}

/// Feeds one event to the editor and answers with the resulting snapshot.
async fn apply(
    editor: &Mutex<SequenceEditor>,
    event: EditorEvent,
    method: &Method,
    uri: &str,
) -> SnapshotResult {
    let mut editor = editor.lock().await;
    editor
        .handle(event)
        .map(|effects| {
            log::debug!("{} {} -> {:?}", method, uri, effects);
            Json(editor.snapshot())
        })
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(method)
                .with_uri(uri)
        })
}

async fn get_snapshot(State(editor): State<Arc<Mutex<SequenceEditor>>>) -> Json<MissionSnapshot> {
    let snapshot = editor.lock().await.snapshot();
    Json(snapshot)
}

async fn get_waypoints(
    State(editor): State<Arc<Mutex<SequenceEditor>>>,
) -> Json<VecResponse<WaypointListing>> {
    let editor = editor.lock().await;
    VecResponse::new(WaypointListing::list(editor.waypoints())).json()
}

async fn get_imported_polygons(
    State(editor): State<Arc<Mutex<SequenceEditor>>>,
) -> Json<VecResponse<ImportedPolygon>> {
    let editor = editor.lock().await;
    VecResponse::new(editor.imported_polygons().to_vec()).json()
}

async fn get_pending_polygon(
    OriginalUri(original_uri): OriginalUri,
    State(editor): State<Arc<Mutex<SequenceEditor>>>,
) -> RouteResult<Json<PendingPolygon>> {
    let pending = editor.lock().await.pending_polygon().cloned();
    pending.map(Json).ok_or_else(|| {
        RouteErrorResponse::new(StatusCode::NOT_FOUND)
            .with_method(&Method::GET)
            .with_uri(original_uri.path())
            .with_message("No polygon is staged.")
    })
}

async fn begin_line_draw(
    OriginalUri(original_uri): OriginalUri,
    State(editor): State<Arc<Mutex<SequenceEditor>>>,
) -> SnapshotResult {
    apply(&editor, EditorEvent::BeginLineDraw, &Method::POST, original_uri.path()).await
}

async fn request_insert_polygon(
    OriginalUri(original_uri): OriginalUri,
    State(editor): State<Arc<Mutex<SequenceEditor>>>,
    Json(dto): Json<InsertPolygonDto>,
) -> SnapshotResult {
    let event = EditorEvent::RequestInsertPolygon {
        waypoint_id: dto.waypoint_id,
        side: dto.side,
    };
    apply(&editor, event, &Method::POST, original_uri.path()).await
}

async fn add_coordinate(
    OriginalUri(original_uri): OriginalUri,
    State(editor): State<Arc<Mutex<SequenceEditor>>>,
    Json(coordinates): Json<Coordinate>,
) -> SnapshotResult {
    let event = EditorEvent::CoordinateAdded(coordinates);
    apply(&editor, event, &Method::POST, original_uri.path()).await
}

async fn finish_drawing(
    OriginalUri(original_uri): OriginalUri,
    State(editor): State<Arc<Mutex<SequenceEditor>>>,
) -> SnapshotResult {
    apply(&editor, EditorEvent::DrawingCompleted, &Method::POST, original_uri.path()).await
}

async fn cancel_drawing(
    OriginalUri(original_uri): OriginalUri,
    State(editor): State<Arc<Mutex<SequenceEditor>>>,
) -> SnapshotResult {
    apply(&editor, EditorEvent::CancelDrawing, &Method::POST, original_uri.path()).await
}

async fn import_pending_polygon(
    OriginalUri(original_uri): OriginalUri,
    State(editor): State<Arc<Mutex<SequenceEditor>>>,
) -> SnapshotResult {
    apply(
        &editor,
        EditorEvent::ImportPendingPolygon,
        &Method::POST,
        original_uri.path(),
    )
    .await
}

async fn remove_waypoint(
    OriginalUri(original_uri): OriginalUri,
    Path(id): Path<u64>,
    State(editor): State<Arc<Mutex<SequenceEditor>>>,
) -> SnapshotResult {
    let event = EditorEvent::RemoveWaypoint(Id::new(id));
    apply(&editor, event, &Method::DELETE, original_uri.path()).await
}

#[cfg(test)]
mod tests {
    use axum::http::Uri;
    use mission::EditorState;

    use super::*;

    fn uri(path: &'static str) -> OriginalUri {
        OriginalUri(Uri::from_static(path))
    }

    fn shared_editor() -> Arc<Mutex<SequenceEditor>> {
        WebState::new(SequenceEditor::new()).editor
    }

    async fn draw_line(editor: &Arc<Mutex<SequenceEditor>>, points: &[(f64, f64)]) {
        begin_line_draw(uri("/draw/line"), State(editor.clone()))
            .await
            .unwrap();
        for (longitude, latitude) in points {
            add_coordinate(
                uri("/draw/coordinates"),
                State(editor.clone()),
                Json(Coordinate::new(*longitude, *latitude)),
            )
            .await
            .unwrap();
        }
        finish_drawing(uri("/draw/finish"), State(editor.clone()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_draw_line_and_list_waypoints() {
        let editor = shared_editor();
        draw_line(&editor, &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]).await;

        let Json(listing) = get_waypoints(State(editor.clone())).await;

        assert_eq!(listing.total_items, 3);
        assert_eq!(listing.data[0].label, "WP(00)");
        assert!(listing.data[0].distance_to_next.is_some());
        assert!(listing.data[2].distance_to_next.is_none());
    }

    #[tokio::test]
    async fn test_insert_and_import_polygon() {
        let editor = shared_editor();
        draw_line(&editor, &[(0.0, 0.0), (0.0, 1.0)]).await;
        let anchor = editor.lock().await.waypoints().get(0).unwrap().id;

        let Json(snapshot) = request_insert_polygon(
            uri("/draw/polygon"),
            State(editor.clone()),
            Json(InsertPolygonDto {
                waypoint_id: anchor,
                side: Side::After,
            }),
        )
        .await
        .unwrap();
        assert!(matches!(snapshot.state, EditorState::DrawingPolygon { .. }));

        for (longitude, latitude) in [(1.0, 0.0), (1.0, 1.0), (2.0, 1.0)] {
            add_coordinate(
                uri("/draw/coordinates"),
                State(editor.clone()),
                Json(Coordinate::new(longitude, latitude)),
            )
            .await
            .unwrap();
        }
        finish_drawing(uri("/draw/finish"), State(editor.clone()))
            .await
            .unwrap();

        let Json(pending) = get_pending_polygon(uri("/polygons/pending"), State(editor.clone()))
            .await
            .unwrap();
        assert_eq!(pending.coordinates.len(), 3);

        let Json(snapshot) =
            import_pending_polygon(uri("/polygons/pending/import"), State(editor.clone()))
                .await
                .unwrap();
        assert_eq!(snapshot.state, EditorState::Idle);
        assert_eq!(snapshot.waypoints.len(), 5);
        assert_eq!(snapshot.imported_polygons.len(), 1);
        assert!(editor.lock().await.waypoints().is_consistent());

        let Json(polygons) = get_imported_polygons(State(editor.clone())).await;
        assert_eq!(polygons.total_items, 1);
    }

    #[tokio::test]
    async fn test_rejected_request_maps_to_conflict() {
        let editor = shared_editor();

        let error = finish_drawing(uri("/api/v1/mission/draw/finish"), State(editor.clone()))
            .await
            .unwrap_err();

        assert_eq!(error.status_code, StatusCode::CONFLICT);
        assert_eq!(error.requested_uri.as_deref(), Some("/api/v1/mission/draw/finish"));
        assert_eq!(error.http_method.as_deref(), Some("POST"));
        assert_eq!(editor.lock().await.state(), EditorState::Idle);
    }

    #[tokio::test]
    async fn test_pending_polygon_missing() {
        let editor = shared_editor();

        let error = get_pending_polygon(uri("/polygons/pending"), State(editor))
            .await
            .unwrap_err();

        assert_eq!(error.status_code, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_remove_unknown_waypoint() {
        let editor = shared_editor();
        draw_line(&editor, &[(0.0, 0.0)]).await;

        let error = remove_waypoint(uri("/waypoints/9"), Path(9), State(editor.clone()))
            .await
            .unwrap_err();

        assert_eq!(error.status_code, StatusCode::NOT_FOUND);
        assert_eq!(editor.lock().await.waypoints().len(), 1);
    }

    #[tokio::test]
    async fn test_insert_dto_wire_format() {
        let dto: InsertPolygonDto =
            serde_json::from_str(r#"{ "waypointId": 3, "side": "before" }"#).unwrap();
        assert_eq!(dto.waypoint_id, Id::new(3));
        assert_eq!(dto.side, Side::Before);
    }
}
