use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{ItemComment, Period, TrendSource, TrendingItem};
use crate::config::AppConfig;
use crate::{Error, Result};

const POSTS_QUERY: &str = "\
query($postedAfter: DateTime!, $postedBefore: DateTime!, $first: Int!) {
    posts(postedAfter: $postedAfter, postedBefore: $postedBefore, first: $first, order: VOTES) {
        edges {
            node {
                id
                name
                tagline
                description
                url
                votesCount
                topics(first: 5) {
                    edges {
                        node {
                            name
                        }
                    }
                }
            }
        }
    }
}";

// Daily digests additionally pull user comments for the AI commentary
const POSTS_QUERY_WITH_COMMENTS: &str = "\
query($postedAfter: DateTime!, $postedBefore: DateTime!, $first: Int!) {
    posts(postedAfter: $postedAfter, postedBefore: $postedBefore, first: $first, order: VOTES) {
        edges {
            node {
                id
                name
                tagline
                description
                url
                votesCount
                topics(first: 5) {
                    edges {
                        node {
                            name
                        }
                    }
                }
                comments(first: 5) {
                    edges {
                        node {
                            body
                            user {
                                name
                            }
                        }
                    }
                }
            }
        }
    }
}";

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: serde_json::Value,
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<PostsData>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct PostsData {
    posts: PostsConnection,
}

#[derive(Deserialize)]
struct PostsConnection {
    edges: Vec<PostEdge>,
}

#[derive(Deserialize)]
struct PostEdge {
    node: PostNode,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostNode {
    id: String,
    name: String,
    #[serde(default)]
    tagline: String,
    #[serde(default)]
    description: Option<String>,
    url: String,
    votes_count: u32,
    #[serde(default)]
    topics: Option<TopicsConnection>,
    #[serde(default)]
    comments: Option<CommentsConnection>,
}

#[derive(Deserialize)]
struct TopicsConnection {
    edges: Vec<TopicEdge>,
}

#[derive(Deserialize)]
struct TopicEdge {
    node: TopicNode,
}

#[derive(Deserialize)]
struct TopicNode {
    name: String,
}

#[derive(Deserialize)]
struct CommentsConnection {
    edges: Vec<CommentEdge>,
}

#[derive(Deserialize)]
struct CommentEdge {
    node: CommentNode,
}

#[derive(Deserialize)]
struct CommentNode {
    #[serde(default)]
    body: String,
    #[serde(default)]
    user: Option<UserNode>,
}

#[derive(Deserialize)]
struct UserNode {
    #[serde(default)]
    name: String,
}

/// Product Hunt GraphQL client
pub struct ProductHuntClient {
    client: Client,
    api_url: String,
    developer_token: String,
    daily_limit: u32,
    weekly_limit: u32,
    monthly_limit: u32,
}

impl ProductHuntClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let token = config
            .product_hunt
            .developer_token
            .clone()
            .ok_or_else(|| Error::Config("Product Hunt developer token not configured".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.product_hunt.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url: config.product_hunt.api_url.clone(),
            developer_token: token,
            daily_limit: config.product_hunt.daily_limit,
            weekly_limit: config.product_hunt.weekly_limit,
            monthly_limit: config.product_hunt.monthly_limit,
        })
    }

    fn limit_for(&self, period: Period) -> u32 {
        match period {
            Period::Daily => self.daily_limit,
            Period::Weekly => self.weekly_limit,
            Period::Monthly => self.monthly_limit,
        }
    }

    async fn query_posts(&self, period: Period, limit: u32) -> Result<Vec<TrendingItem>> {
        let now = Utc::now();
        let posted_after = now - chrono::Duration::days(period.window_days());

        let query = match period {
            Period::Daily => POSTS_QUERY_WITH_COMMENTS,
            Period::Weekly | Period::Monthly => POSTS_QUERY,
        };

        let request = GraphQlRequest {
            query,
            variables: json!({
                "postedAfter": posted_after.to_rfc3339(),
                "postedBefore": now.to_rfc3339(),
                "first": limit,
            }),
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.developer_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("Product Hunt request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("Product Hunt API returned HTTP {status}")));
        }

        let body: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| Error::Fetch(format!("Failed to parse Product Hunt response: {e}")))?;

        if let Some(errors) = body.errors {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(Error::Fetch(format!("GraphQL errors: {}", messages.join("; "))));
        }

        let edges = body.data.map(|d| d.posts.edges).unwrap_or_default();
        Ok(edges.into_iter().map(|edge| to_item(edge.node)).collect())
    }

    /// Minimal fetch used by the connectivity test
    pub async fn probe(&self) -> Result<Vec<TrendingItem>> {
        self.query_posts(Period::Daily, 1).await
    }
}

fn to_item(node: PostNode) -> TrendingItem {
    let topics = node
        .topics
        .map(|t| t.edges.into_iter().map(|e| e.node.name).collect())
        .unwrap_or_default();

    let comments = node
        .comments
        .map(|c| {
            c.edges
                .into_iter()
                .filter(|e| !e.node.body.trim().is_empty())
                .map(|e| ItemComment {
                    body: e.node.body,
                    author: e.node.user.map(|u| u.name).unwrap_or_default(),
                })
                .collect()
        })
        .unwrap_or_default();

    TrendingItem {
        id: node.id,
        name: node.name,
        tagline: node.tagline,
        description: node.description.unwrap_or_default(),
        url: node.url,
        votes_count: node.votes_count,
        topics,
        comments,
    }
}

#[async_trait::async_trait]
impl TrendSource for ProductHuntClient {
    async fn fetch(&self, period: Period) -> Result<Vec<TrendingItem>> {
        let limit = self.limit_for(period);
        tracing::info!("Fetching up to {} {} posts", limit, period);

        let items = self.query_posts(period, limit).await?;
        tracing::info!("Retrieved {} {} posts", items.len(), period);
        Ok(items)
    }
}
