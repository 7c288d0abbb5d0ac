//! Write the OpenAPI document to stdout as pretty-printed JSON.

use users_api::ApiDoc;
use utoipa::OpenApi;

fn main() {
    let doc = ApiDoc::openapi().to_pretty_json().unwrap();
    println!("{doc}");
}
