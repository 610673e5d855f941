lazy_static::lazy_static! {
    pub static ref API_URL: String = env_or("API_URL", "localhost:9000");
    pub static ref MONGO_URL: String = env_or("MONGO_URL", "mongodb://localhost:27017/");
    pub static ref MONGO_DATABASE: String = env_or("MONGO_DATABASE", "todos");
    pub static ref MONGO_COLLECTION: String = env_or("MONGO_COLLECTION", "todo_collection");
    pub static ref WORKERS: Option<usize> = parse_workers(std::env::var("WORKERS").ok());
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| String::from(default))
}

/// Unset, unparsable or zero means the actix default
fn parse_workers(value: Option<String>) -> Option<usize> {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
}
