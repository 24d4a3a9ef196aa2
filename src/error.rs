use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("road network contains no nodes")]
    EmptyNetwork,
    #[error("way {way} references unknown node {node}")]
    UnknownNode { way: i64, node: i64 },
    #[error("invalid data: {0}")]
    InvalidData(String),
}
