use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Form, Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Id of the public template every fresh server starts with.
pub const BASE_TEMPLATE_ID: &str = "base-template";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    pub hostname: String,
    pub ips: Vec<BlockIp>,
    pub status: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlockIp {
    pub address: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub description: String,
    pub public: bool,
    pub created: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TemplateCreationStatus {
    pub status: String,
    pub text: String,
    pub error: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateBlock {
    pub product: Option<String>,
    pub template: Option<String>,
    pub password: Option<String>,
    pub ssh_public_key: Option<String>,
    pub hostname: Option<String>,
    pub username: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateTemplate {
    pub id: Option<String>,
    pub description: Option<String>,
}

/// In-memory account state behind the fake API.
pub struct Account {
    authorization: String,
    blocks: RwLock<HashMap<String, Block>>,
    templates: RwLock<HashMap<String, Template>>,
}

pub type Db = Arc<Account>;

impl Account {
    pub fn new(customer_id: &str, api_key: &str) -> Self {
        let base = Template {
            id: BASE_TEMPLATE_ID.to_string(),
            description: "Base image".to_string(),
            public: true,
            created: Utc
                .with_ymd_and_hms(2013, 6, 5, 14, 21, 7)
                .single()
                .unwrap_or_default(),
        };
        Self {
            authorization: format!("Basic {}", STANDARD.encode(format!("{customer_id}:{api_key}"))),
            blocks: RwLock::new(HashMap::new()),
            templates: RwLock::new(HashMap::from([(base.id.clone(), base)])),
        }
    }
}

pub fn app(customer_id: &str, api_key: &str) -> Router {
    let db: Db = Arc::new(Account::new(customer_id, api_key));
    Router::new()
        .route("/api/blocks.json", get(list_blocks).post(create_block))
        .route("/api/blocks/{file}", get(get_block).delete(destroy_block))
        .route(
            "/api/block_templates.json",
            get(list_templates).post(create_template),
        )
        .route(
            "/api/block_templates/{file}",
            get(get_template).delete(destroy_template),
        )
        .route_layer(middleware::from_fn_with_state(db.clone(), require_basic_auth))
        .with_state(db)
}

pub async fn run(listener: TcpListener, customer_id: &str, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(customer_id, api_key)).await
}

async fn require_basic_auth(
    State(db): State<Db>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == db.authorization);
    if !authorized {
        tracing::warn!(uri = %request.uri(), "Rejected request with bad credentials");
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(next.run(request).await)
}

/// Member routes are `{id}.json`; anything else is not a resource.
fn member_id(file: &str) -> Result<&str, StatusCode> {
    file.strip_suffix(".json")
        .filter(|id| !id.is_empty())
        .ok_or(StatusCode::NOT_FOUND)
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

async fn list_blocks(State(db): State<Db>) -> Json<Vec<Block>> {
    let blocks = db.blocks.read().await;
    let mut all: Vec<Block> = blocks.values().cloned().collect();
    all.sort_by(|a, b| a.id.cmp(&b.id));
    Json(all)
}

async fn get_block(
    State(db): State<Db>,
    Path(file): Path<String>,
) -> Result<Json<Block>, StatusCode> {
    let id = member_id(&file)?;
    let blocks = db.blocks.read().await;
    blocks.get(id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn create_block(
    State(db): State<Db>,
    Form(input): Form<CreateBlock>,
) -> Result<(StatusCode, Json<Block>), StatusCode> {
    let template = present(&input.template).ok_or(StatusCode::UNPROCESSABLE_ENTITY)?;
    present(&input.product).ok_or(StatusCode::UNPROCESSABLE_ENTITY)?;
    if present(&input.password).is_some() == present(&input.ssh_public_key).is_some() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    if !db.templates.read().await.contains_key(template) {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    let mut blocks = db.blocks.write().await;
    let id = Uuid::new_v4().simple().to_string();
    let hostname = present(&input.hostname)
        .map(str::to_string)
        .unwrap_or_else(|| format!("{id}.example.com"));
    let block = Block {
        id: id.clone(),
        hostname,
        ips: vec![BlockIp {
            address: format!("10.0.0.{}", blocks.len() % 254 + 1),
        }],
        status: "queued".to_string(),
    };
    blocks.insert(id, block.clone());
    tracing::info!(id = %block.id, hostname = %block.hostname, "Block created");
    Ok((StatusCode::CREATED, Json(block)))
}

async fn destroy_block(
    State(db): State<Db>,
    Path(file): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let id = member_id(&file)?;
    let mut blocks = db.blocks.write().await;
    blocks.remove(id).map(|_| StatusCode::OK).ok_or(StatusCode::NOT_FOUND)
}

async fn list_templates(State(db): State<Db>) -> Json<Vec<Template>> {
    let templates = db.templates.read().await;
    let mut all: Vec<Template> = templates.values().cloned().collect();
    all.sort_by(|a, b| a.created.cmp(&b.created).then_with(|| a.id.cmp(&b.id)));
    Json(all)
}

async fn get_template(
    State(db): State<Db>,
    Path(file): Path<String>,
) -> Result<Json<Template>, StatusCode> {
    let id = member_id(&file)?;
    let templates = db.templates.read().await;
    templates.get(id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn create_template(
    State(db): State<Db>,
    Form(input): Form<CreateTemplate>,
) -> Result<(StatusCode, Json<TemplateCreationStatus>), StatusCode> {
    let block_id = present(&input.id).ok_or(StatusCode::UNPROCESSABLE_ENTITY)?;
    let hostname = {
        let blocks = db.blocks.read().await;
        blocks
            .get(block_id)
            .map(|b| b.hostname.clone())
            .ok_or(StatusCode::NOT_FOUND)?
    };

    let template = Template {
        id: Uuid::new_v4().simple().to_string(),
        description: present(&input.description)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Snapshot of {hostname}")),
        public: false,
        created: Utc::now(),
    };
    let status = TemplateCreationStatus {
        status: template.id.clone(),
        text: "queued".to_string(),
        error: 0,
    };
    db.templates.write().await.insert(template.id.clone(), template);
    tracing::info!(block_id, template_id = %status.status, "Template creation queued");
    Ok((StatusCode::ACCEPTED, Json(status)))
}

async fn destroy_template(
    State(db): State<Db>,
    Path(file): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let id = member_id(&file)?;
    let mut templates = db.templates.write().await;
    templates.remove(id).map(|_| StatusCode::OK).ok_or(StatusCode::NOT_FOUND)
}
