use utoipa::OpenApi;

use super::{data, health, tasks};

#[derive(OpenApi)]
#[openapi(info(
    title = "harvest-server",
    description = "harvest data sourcing API",
    version = "0.1.0",
    contact(name = "harvest", url = "https://github.com/harvest-rs/harvest")
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::HealthApi::openapi());
    root.merge(tasks::TasksApi::openapi());
    root.merge(data::DataApi::openapi());
    root
}
