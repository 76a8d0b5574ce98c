//! MCP server exposing deal search, routing and ranking as tools.

use crate::backend::HttpBackend;
use crate::session::SearchSession;
use crate::tools::classify::{ClassifyRequest, handle_classify};
use crate::tools::rank::{RankDealsRequest, handle_rank_deals};
use crate::tools::search::{SearchToolRequest, handle_search};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars::{self, JsonSchema, generate::SchemaSettings},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// MCP server for deal discovery queries.
#[derive(Clone)]
pub struct DealServer {
    /// Shared search session (display slot, generation counter, executor)
    session: Arc<SearchSession<HttpBackend>>,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for DealServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DealServer")
            .field("session", &self.session)
            .finish()
    }
}

#[tool_router]
impl DealServer {
    pub fn new(session: Arc<SearchSession<HttpBackend>>) -> Self {
        Self {
            session,
            tool_router: Self::tool_router(),
        }
    }

    pub const fn session(&self) -> &Arc<SearchSession<HttpBackend>> {
        &self.session
    }

    #[tool(
        description = "Search advertising deals and marketing analyses. Free text is routed by keyword (news, market sizing, deals, personas, audience insights, geographic) unless card_types are given. Deals in the result are re-ranked by relevance to the query.",
        input_schema = inline_schema_for_type::<SearchToolRequest>()
    )]
    async fn search(
        &self,
        Parameters(request): Parameters<SearchToolRequest>,
    ) -> std::result::Result<String, String> {
        handle_search(&self.session, request).await
    }

    #[tool(
        description = "Show which endpoint a query would be routed to, and the request body, without calling it.",
        input_schema = inline_schema_for_type::<ClassifyRequest>()
    )]
    fn classify(
        &self,
        Parameters(request): Parameters<ClassifyRequest>,
    ) -> std::result::Result<String, String> {
        Ok(handle_classify(request))
    }

    #[tool(
        description = "Rank a list of deals against a query by textual relevance (name, description, media type). Zero-score deals are dropped.",
        input_schema = inline_schema_for_type::<RankDealsRequest>()
    )]
    fn rank_deals(
        &self,
        Parameters(request): Parameters<RankDealsRequest>,
    ) -> std::result::Result<String, String> {
        handle_rank_deals(request)
    }
}

#[tool_handler]
impl ServerHandler for DealServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "deal-discovery: routes marketing questions to the right analysis endpoint \
                 and ranks advertising deals by relevance. Use classify to preview routing, \
                 search to run a query, and rank_deals to score your own deal lists.",
            )
    }
}

/// Generate an inline JSON schema for MCP tools
///
/// Unlike rmcp's default `schema_for_type()`, this function sets `inline_subschemas = true`
/// so card types render as inline enums instead of `$ref` patterns, which MCP
/// Inspector shows as dropdowns.
pub fn inline_schema_for_type<T: JsonSchema>() -> Arc<JsonObject> {
    let mut settings = SchemaSettings::draft07();
    settings.transforms = vec![Box::new(schemars::transform::AddNullable::default())];
    settings.inline_subschemas = true;

    let generator = settings.into_generator();
    let schema = generator.into_root_schema_for::<T>();
    let object = serde_json::to_value(schema).expect("failed to serialize schema");

    let json_object = match object {
        serde_json::Value::Object(object) => object,
        _ => panic!("Schema serialization produced non-object value"),
    };

    Arc::new(json_object)
}
