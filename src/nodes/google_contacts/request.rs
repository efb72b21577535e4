//! Google Contacts request builder.
//!
//! Lowers the contact operations onto People API calls. The create
//! body is assembled key by key from the sparse field bag so that
//! absent fields never appear in the payload.

use serde_json::{json, Map, Value};

use crate::domain::errors::{NodeError, NodeResult};
use crate::domain::models::Pagination;
use crate::domain::ports::Parameters;
use crate::nodes::request::ApiCall;

use super::models::{split_date, ContactFields, ListOptions, ALL_PERSON_FIELDS};

/// A fully resolved Google Contacts request.
#[derive(Debug, Clone)]
pub enum ContactRequest {
    Create {
        given_name: String,
        family_name: String,
        fields: ContactFields,
    },
    Delete {
        contact_id: String,
    },
    Get {
        contact_id: String,
        person_fields: Vec<String>,
    },
    GetAll {
        person_fields: Vec<String>,
        options: ListOptions,
        pagination: Pagination,
    },
}

/// How the node should execute a built call.
#[derive(Debug, Clone)]
pub enum Plan {
    /// One request. `synthesize_success` replaces the body with the
    /// `{success: true}` marker (delete); `unwrap` projects a property
    /// out of the response (the bounded listing path reads
    /// `connections`), where a missing property contributes nothing.
    Single {
        call: ApiCall,
        synthesize_success: bool,
        unwrap: Option<&'static str>,
    },
    /// Page-token-paginated fetch flattening `property` of each page.
    Paginated {
        call: ApiCall,
        property: &'static str,
    },
}

impl ContactRequest {
    /// Build the request for one input item from the host parameters.
    pub fn from_params(
        resource: &str,
        operation: &str,
        params: &Parameters,
        index: usize,
    ) -> NodeResult<Self> {
        if resource != "contact" {
            return Err(NodeError::UnknownResource {
                node: "google_contacts".to_string(),
                resource: resource.to_string(),
            });
        }
        match operation {
            "create" => Ok(Self::Create {
                given_name: params.string("given_name", index)?,
                family_name: params.string("family_name", index)?,
                fields: params.sparse("additional_fields", index)?,
            }),
            "delete" => Ok(Self::Delete {
                contact_id: params.string("contact_id", index)?,
            }),
            "get" => Ok(Self::Get {
                contact_id: params.string("contact_id", index)?,
                person_fields: params.string_list("fields", index)?,
            }),
            "get_all" => Ok(Self::GetAll {
                person_fields: params.string_list("fields", index)?,
                options: params.sparse("options", index)?,
                pagination: params.pagination(index)?,
            }),
            _ => Err(NodeError::UnknownOperation {
                resource: resource.to_string(),
                operation: operation.to_string(),
            }),
        }
    }

    /// Lower the request to an HTTP call plus execution policy.
    pub fn plan(&self) -> NodeResult<Plan> {
        match self {
            Self::Create {
                given_name,
                family_name,
                fields,
            } => {
                let body = build_create_body(given_name, family_name, fields)?;
                Ok(Plan::Single {
                    call: ApiCall::post("/people:createContact").body(body),
                    synthesize_success: false,
                    unwrap: None,
                })
            }
            Self::Delete { contact_id } => Ok(Plan::Single {
                call: ApiCall::delete(format!("/people/{contact_id}:deleteContact")),
                synthesize_success: true,
                unwrap: None,
            }),
            Self::Get {
                contact_id,
                person_fields,
            } => Ok(Plan::Single {
                call: ApiCall::get(format!("/people/{contact_id}"))
                    .query("personFields", join_person_fields(person_fields)),
                synthesize_success: false,
                unwrap: None,
            }),
            Self::GetAll {
                person_fields,
                options,
                pagination,
            } => {
                let call = ApiCall::get("/people/me/connections")
                    .query_opt("sortOrder", options.sort_order.clone())
                    .query("personFields", join_person_fields(person_fields));
                match pagination {
                    Pagination::All => Ok(Plan::Paginated {
                        call,
                        property: "connections",
                    }),
                    // The bounded path requests one page of `limit`
                    // items and reads its `connections` array; there
                    // is no client-side truncation here.
                    Pagination::Limit(limit) => Ok(Plan::Single {
                        call: call.query("pageSize", limit.to_string()),
                        synthesize_success: false,
                        unwrap: Some("connections"),
                    }),
                }
            }
        }
    }
}

/// A `*` entry selects every person field.
fn join_person_fields(fields: &[String]) -> String {
    if fields.iter().any(|f| f == "*") {
        ALL_PERSON_FIELDS.join(",")
    } else {
        fields.join(",")
    }
}

fn build_create_body(
    given_name: &str,
    family_name: &str,
    fields: &ContactFields,
) -> NodeResult<Value> {
    let mut body = Map::new();

    // middleName starts out empty and is replaced when configured.
    let mut name = Map::new();
    name.insert("familyName".to_string(), json!(family_name));
    name.insert("givenName".to_string(), json!(given_name));
    name.insert(
        "middleName".to_string(),
        json!(fields.middle_name.as_deref().unwrap_or("")),
    );
    body.insert("names".to_string(), json!([Value::Object(name)]));

    if let Some(companies) = &fields.companies {
        body.insert("organizations".to_string(), json!(companies));
    }
    if let Some(phones) = &fields.phones {
        body.insert("phoneNumbers".to_string(), json!(phones));
    }
    if let Some(addresses) = &fields.addresses {
        body.insert("addresses".to_string(), json!(addresses));
    }
    if let Some(relations) = &fields.relations {
        body.insert("relations".to_string(), json!(relations));
    }
    if let Some(events) = &fields.events {
        let events: Vec<Value> = events
            .iter()
            .map(|event| {
                Ok(json!({
                    "date": split_date(&event.date)?,
                    "type": event.event_type,
                }))
            })
            .collect::<NodeResult<_>>()?;
        body.insert("events".to_string(), Value::Array(events));
    }
    if let Some(birthday) = &fields.birthday {
        body.insert(
            "birthdays".to_string(),
            json!([{ "date": split_date(birthday)? }]),
        );
    }
    if let Some(emails) = &fields.emails {
        body.insert("emailAddresses".to_string(), json!(emails));
    }
    if let Some(biography) = &fields.biography {
        body.insert(
            "biographies".to_string(),
            json!([{ "value": biography, "contentType": "TEXT_PLAIN" }]),
        );
    }
    if let Some(custom_fields) = &fields.custom_fields {
        body.insert("userDefined".to_string(), json!(custom_fields));
    }
    if let Some(groups) = &fields.groups {
        let memberships: Vec<Value> = groups
            .iter()
            .map(|group_id| {
                json!({
                    "contactGroupMembership": {
                        "contactGroupResourceName": group_id,
                    }
                })
            })
            .collect();
        body.insert("memberships".to_string(), Value::Array(memberships));
    }

    Ok(Value::Object(body))
}
