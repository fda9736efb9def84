use std::path::Path;

use serde::Serialize;

use super::config::load_sequence_file;
use crate::exit_codes;
use crate::output::{print_result, OutputFormat};
use crate::OutputArgs;

#[derive(Serialize)]
struct NodeInfo {
    index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    name: String,
    method: String,
    url: String,
    conditions: usize,
    validations: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    prompts: Vec<String>,
}

#[derive(Serialize)]
struct NodesResult {
    nodes: Vec<NodeInfo>,
}

pub async fn nodes_cmd(path: &Path, output: OutputArgs) -> i32 {
    let sequence = match load_sequence_file(path, &output) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let nodes: Vec<NodeInfo> = sequence
        .nodes
        .iter()
        .enumerate()
        .map(|(index, n)| NodeInfo {
            index,
            id: n.id.clone(),
            name: n.name.clone(),
            method: n.method.clone(),
            url: n.url.clone(),
            conditions: n.conditions.len(),
            validations: n.validations.len(),
            prompts: n.user_prompts.keys().cloned().collect(),
        })
        .collect();

    let result = NodesResult { nodes };

    if output.format == OutputFormat::Text && !output.quiet {
        for n in &result.nodes {
            let id = n.id.as_deref().unwrap_or("-");
            println!(
                "{:>3}  {:<16} {:<7} {}  ({} conditions)  {}",
                n.index, id, n.method, n.url, n.conditions, n.name
            );
        }
    } else {
        print_result(output.format, output.quiet, &result);
    }
    exit_codes::SUCCESS
}
