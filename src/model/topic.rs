/// Topics generated when the configuration does not list its own.
pub const DEFAULT_TOPICS: [&str; 10] = [
    "Advanced Algorithms and Data Structures",
    "Distributed Systems Design",
    "Machine Learning Model Optimization",
    "Cloud Security Best Practices",
    "Database Performance Tuning",
    "Network Protocol Analysis",
    "Operating System Internals",
    "DevOps Automation Strategies",
    "Cryptography and Secure Communications",
    "Container Orchestration with Kubernetes",
];

pub fn default_topics() -> Vec<String> {
    DEFAULT_TOPICS.iter().map(|t| t.to_string()).collect()
}
