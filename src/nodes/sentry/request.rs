//! Sentry request builder.
//!
//! One variant per (resource, operation) pair, each carrying its own
//! strongly-typed field set, dispatched through a single matcher
//! instead of string comparisons scattered through the execute loop.
//! A request value is built fresh per input item; nothing is shared
//! across iterations.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::errors::{NodeError, NodeResult};
use crate::domain::models::Pagination;
use crate::domain::ports::Parameters;
use crate::nodes::request::ApiCall;

/// Optional filters of `issue.get_all`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IssueListFilters {
    /// Stats aggregation period (e.g. "24h", "14d").
    pub stats_period: Option<String>,
    /// Look the query up as a short ID first.
    pub short_id_lookup: Option<bool>,
    /// Search query string.
    pub query: Option<String>,
}

/// Sparse change set of `issue.update`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IssueUpdate {
    pub status: Option<String>,
    pub assigned_to: Option<String>,
    pub has_seen: Option<bool>,
    pub is_bookmarked: Option<bool>,
    pub is_subscribed: Option<bool>,
    pub is_public: Option<bool>,
}

/// Optional filters of `organization.get_all`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrganizationListFilters {
    /// Restrict to organizations the token holder is a member of.
    pub member: Option<bool>,
    /// Restrict to organizations the token holder owns.
    pub owner: Option<bool>,
}

/// Optional fields of `organization.create`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrganizationCreateFields {
    pub slug: Option<String>,
}

/// Optional fields of `release.get_all`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReleaseListFilters {
    pub query: Option<String>,
}

/// Optional fields of `team.create`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TeamCreateFields {
    pub name: Option<String>,
    pub slug: Option<String>,
}

/// A fully resolved Sentry request, one variant per (resource,
/// operation).
#[derive(Debug, Clone)]
pub enum SentryRequest {
    EventGet {
        organization_slug: String,
        project_slug: String,
        event_id: String,
    },
    EventGetAll {
        organization_slug: String,
        project_slug: String,
        full: bool,
        pagination: Pagination,
    },
    IssueGet {
        issue_id: String,
    },
    IssueGetAll {
        organization_slug: String,
        project_slug: String,
        filters: IssueListFilters,
        pagination: Pagination,
    },
    IssueDelete {
        issue_id: String,
    },
    IssueUpdate {
        issue_id: String,
        changes: IssueUpdate,
    },
    OrganizationGet {
        organization_slug: String,
    },
    OrganizationGetAll {
        filters: OrganizationListFilters,
        pagination: Pagination,
    },
    OrganizationCreate {
        name: String,
        agree_terms: bool,
        fields: OrganizationCreateFields,
    },
    ProjectGet {
        organization_slug: String,
        project_slug: String,
    },
    ProjectGetAll {
        pagination: Pagination,
    },
    ReleaseGet {
        organization_slug: String,
        version: String,
    },
    ReleaseGetAll {
        organization_slug: String,
        filters: ReleaseListFilters,
        pagination: Pagination,
    },
    TeamGet {
        organization_slug: String,
        team_slug: String,
    },
    TeamGetAll {
        organization_slug: String,
        pagination: Pagination,
    },
    TeamCreate {
        organization_slug: String,
        fields: TeamCreateFields,
    },
}

/// How the node should execute a built call.
#[derive(Debug, Clone)]
pub enum Plan {
    /// One request; optionally replace the response body with the
    /// `{success: true}` marker (delete operations).
    Single {
        call: ApiCall,
        synthesize_success: bool,
    },
    /// Cursor-paginated fetch; optionally truncate the flattened
    /// result client-side (the bounded "return all disabled" path).
    Paginated {
        call: ApiCall,
        truncate: Option<usize>,
    },
}

impl SentryRequest {
    /// Build the request for one input item from the host parameters.
    pub fn from_params(
        resource: &str,
        operation: &str,
        params: &Parameters,
        index: usize,
    ) -> NodeResult<Self> {
        match (resource, operation) {
            ("event", "get") => Ok(Self::EventGet {
                organization_slug: params.string("organization_slug", index)?,
                project_slug: params.string("project_slug", index)?,
                event_id: params.string("event_id", index)?,
            }),
            ("event", "get_all") => Ok(Self::EventGetAll {
                organization_slug: params.string("organization_slug", index)?,
                project_slug: params.string("project_slug", index)?,
                full: params.boolean("full", index)?,
                pagination: params.pagination(index)?,
            }),
            ("issue", "get") => Ok(Self::IssueGet {
                issue_id: params.string("issue_id", index)?,
            }),
            ("issue", "get_all") => Ok(Self::IssueGetAll {
                organization_slug: params.string("organization_slug", index)?,
                project_slug: params.string("project_slug", index)?,
                filters: params.sparse("additional_fields", index)?,
                pagination: params.pagination(index)?,
            }),
            ("issue", "delete") => Ok(Self::IssueDelete {
                issue_id: params.string("issue_id", index)?,
            }),
            ("issue", "update") => Ok(Self::IssueUpdate {
                issue_id: params.string("issue_id", index)?,
                changes: params.sparse("additional_fields", index)?,
            }),
            ("organization", "get") => Ok(Self::OrganizationGet {
                organization_slug: params.string("organization_slug", index)?,
            }),
            ("organization", "get_all") => Ok(Self::OrganizationGetAll {
                filters: params.sparse("additional_fields", index)?,
                pagination: params.pagination(index)?,
            }),
            ("organization", "create") => Ok(Self::OrganizationCreate {
                name: params.string("name", index)?,
                agree_terms: params.boolean("agree_terms", index)?,
                fields: params.sparse("additional_fields", index)?,
            }),
            ("project", "get") => Ok(Self::ProjectGet {
                organization_slug: params.string("organization_slug", index)?,
                project_slug: params.string("project_slug", index)?,
            }),
            ("project", "get_all") => Ok(Self::ProjectGetAll {
                pagination: params.pagination(index)?,
            }),
            ("release", "get") => Ok(Self::ReleaseGet {
                organization_slug: params.string("organization_slug", index)?,
                version: params.string("version", index)?,
            }),
            ("release", "get_all") => Ok(Self::ReleaseGetAll {
                organization_slug: params.string("organization_slug", index)?,
                filters: params.sparse("additional_fields", index)?,
                pagination: params.pagination(index)?,
            }),
            ("team", "get") => Ok(Self::TeamGet {
                organization_slug: params.string("organization_slug", index)?,
                team_slug: params.string("team_slug", index)?,
            }),
            ("team", "get_all") => Ok(Self::TeamGetAll {
                organization_slug: params.string("organization_slug", index)?,
                pagination: params.pagination(index)?,
            }),
            ("team", "create") => Ok(Self::TeamCreate {
                organization_slug: params.string("organization_slug", index)?,
                fields: params.sparse("additional_fields", index)?,
            }),
            ("event" | "issue" | "organization" | "project" | "release" | "team", _) => {
                Err(NodeError::UnknownOperation {
                    resource: resource.to_string(),
                    operation: operation.to_string(),
                })
            }
            _ => Err(NodeError::UnknownResource {
                node: "sentry".to_string(),
                resource: resource.to_string(),
            }),
        }
    }

    /// Lower the request to an HTTP call plus execution policy.
    pub fn plan(&self) -> Plan {
        match self {
            Self::EventGet {
                organization_slug,
                project_slug,
                event_id,
            } => single(ApiCall::get(format!(
                "/api/0/projects/{organization_slug}/{project_slug}/events/{event_id}/"
            ))),
            Self::EventGetAll {
                organization_slug,
                project_slug,
                full,
                pagination,
            } => {
                let call = ApiCall::get(format!(
                    "/api/0/projects/{organization_slug}/{project_slug}/events/"
                ));
                let call = with_limit(call, pagination).query("full", full.to_string());
                paginated(call, pagination)
            }
            Self::IssueGet { issue_id } => {
                single(ApiCall::get(format!("/api/0/issues/{issue_id}/")))
            }
            Self::IssueGetAll {
                organization_slug,
                project_slug,
                filters,
                pagination,
            } => {
                let call = ApiCall::get(format!(
                    "/api/0/projects/{organization_slug}/{project_slug}/issues/"
                ))
                .query_opt("statsPeriod", filters.stats_period.clone())
                .query_opt(
                    "shortIdLookup",
                    filters.short_id_lookup.map(|v| v.to_string()),
                )
                .query_opt("query", filters.query.clone());
                paginated(with_limit(call, pagination), pagination)
            }
            Self::IssueDelete { issue_id } => Plan::Single {
                call: ApiCall::delete(format!("/api/0/issues/{issue_id}/")),
                synthesize_success: true,
            },
            Self::IssueUpdate { issue_id, changes } => {
                let mut body = Map::new();
                insert_opt(&mut body, "status", changes.status.as_deref());
                insert_opt(&mut body, "assignedTo", changes.assigned_to.as_deref());
                insert_bool_opt(&mut body, "hasSeen", changes.has_seen);
                insert_bool_opt(&mut body, "isBookmarked", changes.is_bookmarked);
                insert_bool_opt(&mut body, "isSubscribed", changes.is_subscribed);
                insert_bool_opt(&mut body, "isPublic", changes.is_public);
                single(
                    ApiCall::put(format!("/api/0/issues/{issue_id}/")).body(Value::Object(body)),
                )
            }
            Self::OrganizationGet { organization_slug } => single(ApiCall::get(format!(
                "/api/0/organizations/{organization_slug}/"
            ))),
            Self::OrganizationGetAll {
                filters,
                pagination,
            } => {
                let call = ApiCall::get("/api/0/organizations/")
                    .query_opt("member", filters.member.map(|v| v.to_string()))
                    .query_opt("owner", filters.owner.map(|v| v.to_string()));
                paginated(with_limit(call, pagination), pagination)
            }
            Self::OrganizationCreate {
                name,
                agree_terms,
                fields,
            } => {
                let mut body = Map::new();
                body.insert("name".to_string(), Value::String(name.clone()));
                body.insert("agreeTerms".to_string(), Value::Bool(*agree_terms));
                insert_opt(&mut body, "slug", fields.slug.as_deref());
                single(ApiCall::post("/api/0/organizations/").body(Value::Object(body)))
            }
            Self::ProjectGet {
                organization_slug,
                project_slug,
            } => single(ApiCall::get(format!(
                "/api/0/projects/{organization_slug}/{project_slug}/"
            ))),
            Self::ProjectGetAll { pagination } => {
                let call = with_limit(ApiCall::get("/api/0/projects/"), pagination);
                paginated(call, pagination)
            }
            Self::ReleaseGet {
                organization_slug,
                version,
            } => single(ApiCall::get(format!(
                "/api/0/organizations/{organization_slug}/releases/{version}/"
            ))),
            Self::ReleaseGetAll {
                organization_slug,
                filters,
                pagination,
            } => {
                let call = ApiCall::get(format!(
                    "/api/0/organizations/{organization_slug}/releases/"
                ))
                .query_opt("query", filters.query.clone());
                paginated(with_limit(call, pagination), pagination)
            }
            Self::TeamGet {
                organization_slug,
                team_slug,
            } => single(ApiCall::get(format!(
                "/api/0/teams/{organization_slug}/{team_slug}/"
            ))),
            Self::TeamGetAll {
                organization_slug,
                pagination,
            } => {
                let call = with_limit(
                    ApiCall::get(format!("/api/0/organizations/{organization_slug}/teams/")),
                    pagination,
                );
                paginated(call, pagination)
            }
            Self::TeamCreate {
                organization_slug,
                fields,
            } => {
                let mut body = Map::new();
                insert_opt(&mut body, "name", fields.name.as_deref());
                insert_opt(&mut body, "slug", fields.slug.as_deref());
                single(
                    ApiCall::post(format!("/api/0/organizations/{organization_slug}/teams/"))
                        .body(Value::Object(body)),
                )
            }
        }
    }
}

fn single(call: ApiCall) -> Plan {
    Plan::Single {
        call,
        synthesize_success: false,
    }
}

fn paginated(call: ApiCall, pagination: &Pagination) -> Plan {
    Plan::Paginated {
        call,
        truncate: pagination.truncate_to(),
    }
}

/// The bounded path sends the limit as a query parameter; the same
/// value is applied again downstream as client-side truncation.
fn with_limit(call: ApiCall, pagination: &Pagination) -> ApiCall {
    match pagination {
        Pagination::All => call,
        Pagination::Limit(n) => call.query("limit", n.to_string()),
    }
}

fn insert_opt(body: &mut Map<String, Value>, key: &str, value: Option<&str>) {
    if let Some(v) = value {
        body.insert(key.to_string(), Value::String(v.to_string()));
    }
}

fn insert_bool_opt(body: &mut Map<String, Value>, key: &str, value: Option<bool>) {
    if let Some(v) = value {
        body.insert(key.to_string(), Value::Bool(v));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;

    use crate::domain::ports::StaticParameters;

    fn params(provider: StaticParameters) -> Parameters {
        Parameters::new(Arc::new(provider))
    }

    fn query_keys(call: &ApiCall) -> Vec<&str> {
        call.query.iter().map(|(k, _)| k.as_str()).collect()
    }

    #[test]
    fn test_event_get_endpoint_interpolation() {
        let request = SentryRequest::EventGet {
            organization_slug: "acme".into(),
            project_slug: "backend".into(),
            event_id: "deadbeef".into(),
        };
        match request.plan() {
            Plan::Single { call, .. } => {
                assert_eq!(call.endpoint, "/api/0/projects/acme/backend/events/deadbeef/");
                assert!(call.query.is_empty());
                assert!(call.body.is_none());
            }
            Plan::Paginated { .. } => panic!("expected a single call"),
        }
    }

    #[test]
    fn test_event_get_all_bounded_sets_limit_and_truncation() {
        let request = SentryRequest::EventGetAll {
            organization_slug: "acme".into(),
            project_slug: "backend".into(),
            full: true,
            pagination: Pagination::Limit(10),
        };
        match request.plan() {
            Plan::Paginated { call, truncate } => {
                assert_eq!(query_keys(&call), vec!["limit", "full"]);
                assert_eq!(call.query[0].1, "10");
                assert_eq!(call.query[1].1, "true");
                assert_eq!(truncate, Some(10));
            }
            Plan::Single { .. } => panic!("expected a paginated call"),
        }
    }

    #[test]
    fn test_event_get_all_return_all_has_no_limit() {
        let request = SentryRequest::EventGetAll {
            organization_slug: "acme".into(),
            project_slug: "backend".into(),
            full: false,
            pagination: Pagination::All,
        };
        match request.plan() {
            Plan::Paginated { call, truncate } => {
                assert_eq!(query_keys(&call), vec!["full"]);
                assert_eq!(truncate, None);
            }
            Plan::Single { .. } => panic!("expected a paginated call"),
        }
    }

    #[test]
    fn test_issue_get_all_absent_filters_are_omitted() {
        let request = SentryRequest::IssueGetAll {
            organization_slug: "acme".into(),
            project_slug: "backend".into(),
            filters: IssueListFilters {
                query: Some("is:unresolved".into()),
                ..Default::default()
            },
            pagination: Pagination::All,
        };
        match request.plan() {
            Plan::Paginated { call, .. } => {
                assert_eq!(query_keys(&call), vec!["query"]);
                assert_eq!(call.query[0].1, "is:unresolved");
            }
            Plan::Single { .. } => panic!("expected a paginated call"),
        }
    }

    #[test]
    fn test_issue_update_body_uses_wire_names() {
        let request = SentryRequest::IssueUpdate {
            issue_id: "42".into(),
            changes: IssueUpdate {
                status: Some("resolved".into()),
                has_seen: Some(false),
                ..Default::default()
            },
        };
        match request.plan() {
            Plan::Single { call, .. } => {
                let body = call.body.unwrap();
                assert_eq!(body, json!({"status": "resolved", "hasSeen": false}));
            }
            Plan::Paginated { .. } => panic!("expected a single call"),
        }
    }

    #[test]
    fn test_issue_delete_synthesizes_success() {
        let request = SentryRequest::IssueDelete { issue_id: "42".into() };
        match request.plan() {
            Plan::Single {
                call,
                synthesize_success,
            } => {
                assert_eq!(call.method, crate::nodes::request::HttpMethod::Delete);
                assert_eq!(call.endpoint, "/api/0/issues/42/");
                assert!(synthesize_success);
            }
            Plan::Paginated { .. } => panic!("expected a single call"),
        }
    }

    #[test]
    fn test_organization_create_body() {
        let request = SentryRequest::OrganizationCreate {
            name: "Acme".into(),
            agree_terms: true,
            fields: OrganizationCreateFields { slug: None },
        };
        match request.plan() {
            Plan::Single { call, .. } => {
                assert_eq!(call.endpoint, "/api/0/organizations/");
                assert_eq!(call.body.unwrap(), json!({"name": "Acme", "agreeTerms": true}));
            }
            Plan::Paginated { .. } => panic!("expected a single call"),
        }
    }

    #[test]
    fn test_from_params_builds_issue_get() {
        let p = params(
            StaticParameters::default().with("issue_id", json!("1234")),
        );
        let request = SentryRequest::from_params("issue", "get", &p, 0).unwrap();
        assert!(matches!(request, SentryRequest::IssueGet { ref issue_id } if issue_id == "1234"));
    }

    #[test]
    fn test_from_params_reads_additional_fields_bag() {
        let p = params(
            StaticParameters::default()
                .with("organization_slug", json!("acme"))
                .with("project_slug", json!("backend"))
                .with("return_all", json!(true))
                .with(
                    "additional_fields",
                    json!({"stats_period": "24h", "short_id_lookup": true}),
                ),
        );
        let request = SentryRequest::from_params("issue", "get_all", &p, 0).unwrap();
        match request.plan() {
            Plan::Paginated { call, .. } => {
                assert_eq!(query_keys(&call), vec!["statsPeriod", "shortIdLookup"]);
            }
            Plan::Single { .. } => panic!("expected a paginated call"),
        }
    }

    #[test]
    fn test_unknown_operation_and_resource() {
        let p = params(StaticParameters::default());
        assert!(matches!(
            SentryRequest::from_params("issue", "archive", &p, 0).unwrap_err(),
            NodeError::UnknownOperation { .. }
        ));
        assert!(matches!(
            SentryRequest::from_params("alert", "get", &p, 0).unwrap_err(),
            NodeError::UnknownResource { .. }
        ));
    }

    #[test]
    fn test_team_create_with_only_slug() {
        let request = SentryRequest::TeamCreate {
            organization_slug: "acme".into(),
            fields: TeamCreateFields {
                name: None,
                slug: Some("platform".into()),
            },
        };
        match request.plan() {
            Plan::Single { call, .. } => {
                assert_eq!(call.endpoint, "/api/0/organizations/acme/teams/");
                assert_eq!(call.body.unwrap(), json!({"slug": "platform"}));
            }
            Plan::Paginated { .. } => panic!("expected a single call"),
        }
    }
}
