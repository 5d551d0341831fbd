//! In-process stub of the Lightning backend and identity provider.
//!
//! Every request is recorded as `"METHOD /path auth|anon"` so tests can
//! assert which calls were — and were not — issued.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use uuid::Uuid;

use lightning_client::config::Config;

pub const EMAIL: &str = "dev@example.com";
pub const PASSWORD: &str = "lightning-pass";

pub struct StubState {
    pub user_id: Uuid,
    /// Organization returned by the lookup; `None` → `success: false`.
    pub org: Option<Uuid>,
    /// Organization returned by provisioning; `None` → `success: false`.
    pub provision: Option<Uuid>,
    /// Candidate answers until the interview completes.
    pub complete_after: u32,
    /// Paths that answer 500 instead of their normal payload.
    pub fail: HashSet<String>,
    pub project_id: Uuid,
    pub task_a: Uuid,
    pub task_b: Uuid,
    pub interview_done: Uuid,
    pub interview_open: Uuid,
    pub hits: Mutex<Vec<String>>,
    pub respond_counts: Mutex<HashMap<Uuid, u32>>,
    /// `conversation_history` lengths seen by the chat endpoint.
    pub history_lens: Mutex<Vec<usize>>,
}

impl StubState {
    pub fn new() -> Self {
        Self {
            user_id: Uuid::new_v4(),
            org: Some(Uuid::new_v4()),
            provision: None,
            complete_after: 2,
            fail: HashSet::new(),
            project_id: Uuid::new_v4(),
            task_a: Uuid::new_v4(),
            task_b: Uuid::new_v4(),
            interview_done: Uuid::new_v4(),
            interview_open: Uuid::new_v4(),
            hits: Mutex::new(Vec::new()),
            respond_counts: Mutex::new(HashMap::new()),
            history_lens: Mutex::new(Vec::new()),
        }
    }
}

pub struct Stub {
    pub addr: SocketAddr,
    pub state: Arc<StubState>,
}

impl Stub {
    pub async fn spawn(state: StubState) -> Self {
        let shared = Arc::new(state);
        let app = router(shared.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            addr,
            state: shared,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Config pointing both the backend and the identity provider at the
    /// stub, with non-interactive credentials.
    pub fn config(&self) -> Config {
        Config {
            api_url: self.base_url(),
            auth_url: self.base_url(),
            auth_anon_key: "stub-anon".into(),
            email: Some(EMAIL.into()),
            password: Some(PASSWORD.into()),
            http_timeout_secs: 5,
            rust_log: "info".into(),
        }
    }

    pub fn hits(&self) -> Vec<String> {
        self.state.hits.lock().unwrap().clone()
    }

    /// Hits against the backend surface (everything except the provider).
    pub fn api_hits(&self) -> Vec<String> {
        self.hits()
            .into_iter()
            .filter(|hit| hit.contains(" /api") || hit.contains(" /health"))
            .collect()
    }

    pub fn count(&self, needle: &str) -> usize {
        self.hits()
            .iter()
            .filter(|hit| hit.contains(needle))
            .count()
    }
}

fn router(state: Arc<StubState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/auth/v1/signup", post(signup))
        .route("/auth/v1/token", post(token))
        .route("/auth/v1/logout", post(logout))
        .route("/api/user/organization", get(organization))
        .route("/api/auth/setup-user-org", post(setup_user_org))
        .route("/api/chat", post(legacy_chat))
        .route("/api/ai/chat", post(ai_chat))
        .route("/api/ai/capabilities", get(capabilities))
        .route("/api/interviews", get(interviews))
        .route("/api/interview/start", post(interview_start))
        .route("/api/interview/respond", post(interview_respond))
        .route("/api/interview/analyze", post(interview_analyze))
        .route("/api/interview/:id", get(interview_details))
        .route("/api/projects", get(projects_list))
        .route("/api/project/create", post(project_create))
        .route("/api/project/:id/tasks", get(project_tasks))
        .route("/api/task/update", post(task_update))
        .route("/api/expenses", get(expenses))
        .route("/api/expenses/summary", get(expenses_summary))
        .route("/api/expense/create", post(expense_create))
        .route("/api/migration/analyze-csv", post(migration_analyze))
        .route("/api/migration/import-expenses", post(migration_import))
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state)
}

async fn record(
    State(state): State<Arc<StubState>>,
    request: Request,
    next: Next,
) -> Response {
    let auth = if request.headers().contains_key("authorization") {
        "auth"
    } else {
        "anon"
    };
    let path = request.uri().path().to_string();
    state
        .hits
        .lock()
        .unwrap()
        .push(format!("{} {} {}", request.method(), path, auth));

    if state.fail.contains(&path) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "stub failure").into_response();
    }
    next.run(request).await
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "service": "lightning-backend" }))
}

fn token_json(state: &StubState, access: &str) -> Json<Value> {
    Json(json!({
        "access_token": access,
        "refresh_token": "stub-refresh",
        "user": { "id": state.user_id, "email": EMAIL }
    }))
}

async fn signup(State(state): State<Arc<StubState>>, Json(body): Json<Value>) -> Response {
    if body["email"].as_str().is_some() && body["password"].as_str().is_some() {
        token_json(&state, "stub-token").into_response()
    } else {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "msg": "email and password required" })),
        )
            .into_response()
    }
}

async fn token(
    State(state): State<Arc<StubState>>,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    match params.get("grant_type").map(String::as_str) {
        Some("password") => {
            if body["email"].as_str() == Some(EMAIL)
                && body["password"].as_str() == Some(PASSWORD)
            {
                token_json(&state, "stub-token").into_response()
            } else {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error_description": "Invalid login credentials" })),
                )
                    .into_response()
            }
        }
        Some("refresh_token") => token_json(&state, "stub-token-refreshed").into_response(),
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error_description": "unsupported grant type" })),
        )
            .into_response(),
    }
}

async fn logout() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn organization(
    State(state): State<Arc<StubState>>,
    Query(_params): Query<HashMap<String, String>>,
) -> Json<Value> {
    match state.org {
        Some(org) => Json(json!({ "success": true, "organization_id": org })),
        None => Json(json!({
            "success": false,
            "error": "No active organization found for user"
        })),
    }
}

async fn setup_user_org(
    State(state): State<Arc<StubState>>,
    Query(_params): Query<HashMap<String, String>>,
) -> Json<Value> {
    match state.provision {
        Some(org) => Json(json!({
            "success": true,
            "message": "Organization created",
            "organization_id": org
        })),
        None => Json(json!({ "success": false, "error": "provisioning disabled" })),
    }
}

async fn legacy_chat(Json(body): Json<Value>) -> Json<Value> {
    let _ = body;
    Json(json!({ "response": "pong" }))
}

async fn ai_chat(State(state): State<Arc<StubState>>, Json(body): Json<Value>) -> Json<Value> {
    let history_len = body["conversation_history"]
        .as_array()
        .map(Vec::len)
        .unwrap_or(0);
    state.history_lens.lock().unwrap().push(history_len);

    let message = body["message"].as_str().unwrap_or_default();
    Json(json!({
        "success": true,
        "message": format!("You said: {message}"),
        "intent": { "module": "general", "action": "chat", "confidence": 0.9 },
        "action_taken": null
    }))
}

async fn capabilities() -> Json<Value> {
    Json(json!({
        "success": true,
        "capabilities": {
            "finance": ["Add expenses from natural language"],
            "projects": ["Create projects from descriptions"],
            "hr": ["Conduct AI interviews"]
        },
        "examples": ["Add expense: Coffee at Starbucks $5.50"]
    }))
}

async fn interviews(State(state): State<Arc<StubState>>) -> Json<Value> {
    Json(json!({
        "success": true,
        "interviews": [
            {
                "id": state.interview_done,
                "candidate_name": "Ada Lovelace",
                "position": "Senior Engineer",
                "status": "completed"
            },
            {
                "id": state.interview_open,
                "candidate_name": "Grace Hopper",
                "position": "Staff Engineer",
                "status": "in_progress"
            }
        ]
    }))
}

async fn interview_start(
    State(state): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let _ = body;
    let id = Uuid::new_v4();
    state.respond_counts.lock().unwrap().insert(id, 0);
    Json(json!({
        "success": true,
        "interview_id": id,
        "ai_message": "Welcome! Let's start: tell me about yourself.",
        "question_number": 1,
        "total_questions": 8
    }))
}

async fn interview_respond(
    State(state): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let id = body["interview_id"]
        .as_str()
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .unwrap_or_default();

    let answered = {
        let mut counts = state.respond_counts.lock().unwrap();
        let entry = counts.entry(id).or_insert(0);
        *entry += 1;
        *entry
    };

    let is_complete = answered >= state.complete_after;
    let ai_message = if is_complete {
        "That concludes our interview. Thank you!".to_string()
    } else {
        format!("Question {}: what drew you to this role?", answered + 1)
    };
    Json(json!({
        "success": true,
        "ai_message": ai_message,
        "question_number": (answered + 1).min(8),
        "total_questions": 8,
        "is_complete": is_complete
    }))
}

async fn interview_analyze(Json(body): Json<Value>) -> Json<Value> {
    let _ = body;
    Json(json!({
        "success": true,
        "analysis": {
            "overall_score": 82,
            "technical_score": 80,
            "communication_score": 85,
            "cultural_fit_score": 78,
            "strengths": ["clear communicator", "strong systems background"],
            "weaknesses": ["limited production Rust"],
            "key_insights": "Would ramp quickly on the platform team.",
            "recommendation": "hire",
            "detailed_analysis": "Consistent, specific answers across all questions."
        }
    }))
}

async fn interview_details(
    State(state): State<Arc<StubState>>,
    Path(id): Path<Uuid>,
) -> Json<Value> {
    let answered = *state
        .respond_counts
        .lock()
        .unwrap()
        .get(&id)
        .unwrap_or(&0);
    let completed = answered >= state.complete_after;

    let mut transcripts = vec![json!({
        "speaker": "ai",
        "message": "Welcome! Let's start: tell me about yourself.",
        "timestamp": "2024-03-01T10:00:00+00:00"
    })];
    for i in 1..=answered {
        transcripts.push(json!({
            "speaker": "candidate",
            "message": format!("answer {i}"),
            "timestamp": null
        }));
        transcripts.push(json!({
            "speaker": "ai",
            "message": format!("Question {}: tell me more.", i + 1),
            "timestamp": null
        }));
    }

    Json(json!({
        "success": true,
        "interview": {
            "id": id,
            "candidate_name": "Ada Lovelace",
            "position": "Senior Engineer",
            "status": if completed { "completed" } else { "in_progress" }
        },
        "transcripts": transcripts,
        "analysis": if completed {
            json!({
                "overall_score": 82,
                "technical_score": 80,
                "communication_score": 85,
                "cultural_fit_score": 78,
                "strengths": ["clear communicator"],
                "weaknesses": [],
                "recommendation": "hire"
            })
        } else {
            Value::Null
        }
    }))
}

async fn projects_list(State(state): State<Arc<StubState>>) -> Json<Value> {
    Json(json!({
        "success": true,
        "projects": [{
            "id": state.project_id,
            "project_name": "Website Redesign",
            "description": "Full redesign for the agency site",
            "client_name": "Acme Co",
            "status": "active",
            "priority": "high",
            "ai_generated": true
        }]
    }))
}

async fn project_create(
    State(state): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    Json(json!({
        "success": true,
        "project": {
            "id": state.project_id,
            "project_name": "Website Redesign",
            "description": "Full redesign for the agency site",
            "client_name": body["client_name"],
            "status": "planning",
            "priority": "high",
            "ai_generated": true
        },
        "tasks": stub_tasks(&state)
    }))
}

fn stub_tasks(state: &StubState) -> Value {
    json!([
        {
            "id": state.task_a,
            "task_title": "Wireframes",
            "task_description": "Low-fidelity wireframes for all pages",
            "status": "todo",
            "priority": "high",
            "estimated_hours": 6.0
        },
        {
            "id": state.task_b,
            "task_title": "Content migration",
            "task_description": null,
            "status": "todo",
            "priority": "medium",
            "estimated_hours": 10.0
        }
    ])
}

async fn project_tasks(
    State(state): State<Arc<StubState>>,
    Path(_id): Path<Uuid>,
) -> Json<Value> {
    Json(json!({ "success": true, "tasks": stub_tasks(&state) }))
}

async fn task_update(Json(body): Json<Value>) -> Json<Value> {
    let _ = body;
    Json(json!({ "success": true }))
}

async fn expenses(State(state): State<Arc<StubState>>) -> Json<Value> {
    let _ = &state;
    Json(json!({
        "success": true,
        "expenses": [{
            "id": Uuid::new_v4(),
            "description": "Adobe Creative Cloud subscription",
            "amount": 99.99,
            "vendor": "Adobe Inc.",
            "expense_date": "2024-02-14",
            "category": "Software & Tools",
            "ai_categorized": true,
            "status": "pending"
        }]
    }))
}

async fn expenses_summary() -> Json<Value> {
    Json(json!({
        "success": true,
        "summary": {
            "total": 1234.5,
            "by_category": {
                "Software & Tools": 800.0,
                "Travel": 300.0,
                "Client Meetings": 134.5
            }
        }
    }))
}

async fn expense_create(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "success": true,
        "expense": {
            "id": Uuid::new_v4(),
            "description": body["description"],
            "amount": body["amount"],
            "vendor": body["vendor"],
            "expense_date": body["expense_date"],
            "category": "Client Meetings",
            "ai_categorized": true,
            "status": "pending"
        },
        "ai_category": "Client Meetings",
        "confidence": 0.82
    }))
}

/// Counts data rows in an uploaded CSV (lines minus the header).
async fn read_csv_rows(multipart: &mut Multipart) -> u64 {
    let mut rows = 0;
    while let Some(field) = multipart.next_field().await.unwrap() {
        if field.name() == Some("file") {
            let content = field.bytes().await.unwrap();
            let lines = content
                .split(|byte| *byte == b'\n')
                .filter(|line| !line.is_empty())
                .count() as u64;
            rows = lines.saturating_sub(1);
        }
    }
    rows
}

async fn migration_analyze(mut multipart: Multipart) -> Json<Value> {
    let rows = read_csv_rows(&mut multipart).await;
    Json(json!({
        "success": true,
        "original_columns": ["Date", "Desc", "Cost"],
        "mapping": {
            "mapping": {
                "Date": "expense_date",
                "Desc": "description",
                "Cost": "amount"
            },
            "confidence": 0.93,
            "warnings": ["no vendor column detected"]
        },
        "preview": [
            { "Date": "2024-01-05", "Desc": "Team lunch", "Cost": "42.00" }
        ],
        "total_rows": rows
    }))
}

async fn migration_import(mut multipart: Multipart) -> Json<Value> {
    let rows = read_csv_rows(&mut multipart).await;
    Json(json!({ "success": true, "imported": rows, "total": rows }))
}
