use std::str::FromStr;

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use uuid::Uuid;

use crate::{entities::option_fields::OptionField, errors::FieldError, validation::validate_project};

// ───── Constants ──────────────────────────────────────────────────────
pub const MAX_WEBSITE_NAME_LENGTH: u64 = 100;
pub const MAX_WEBSITE_TYPE_LENGTH: u64 = 100;
pub const MAX_OVERVIEW_TITLE_LENGTH: u64 = 300;
pub const MAX_OVERVIEW_DESCRIPTION_LENGTH: u64 = 1000;
pub const MAX_PROJECT_INFO_TITLE_LENGTH: u64 = 50;
pub const MAX_LINK_LABEL_LENGTH: u64 = 50;
pub const MAX_IMAGE_LABEL_LENGTH: u64 = 300;
pub const MAX_LISTS: u64 = 5;
pub const MAX_PROJECT_INFOS: u64 = 7;
pub const MAX_OVERVIEW_LINKS: u64 = 3;
pub const MAX_IMAGES: u64 = 10;

// ───── Stored Document ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    #[display("horizontal")]
    Horizontal,
    #[default]
    #[display("vertical")]
    Vertical,
}

impl FromStr for ListType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" => Ok(ListType::Horizontal),
            "vertical" => Ok(ListType::Vertical),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    #[serde(rename = "linkLabel", alias = "link_label")]
    pub link_label: String,
    pub url: String,
}

/// One entry of `ProjectInfo::lists`: a plain label or a group of links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListEntry {
    Label(String),
    Links(Vec<Link>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub title: String,
    #[serde(rename = "listType", alias = "list_type", default)]
    pub list_type: ListType,
    pub lists: Vec<ListEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub title: String,
    pub description: String,
    #[serde(rename = "ProjectInfos", alias = "project_infos")]
    pub project_infos: Vec<ProjectInfo>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub img: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub website_name: String,
    pub website_type: String,
    pub scroll_image_url: String,
    pub overview: Overview,
    pub images_url: Vec<Image>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, sqlx::FromRow)]
pub struct ProjectRow {
    pub id: Uuid,
    pub website_name: String,
    pub website_type: String,
    pub scroll_image_url: String,
    pub overview: Json<Overview>,
    pub images_url: Json<Vec<Image>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct ProjectOverviewRow {
    pub id: Uuid,
    pub website_name: String,
    pub overview: Json<Overview>,
}

/// A validated project body, ready to be persisted.
///
/// Only produced by `validation::validate_project`; identity and
/// timestamps are assigned by the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectInsert {
    pub website_name: String,
    pub website_type: String,
    pub scroll_image_url: String,
    pub overview: Overview,
    pub images_url: Vec<Image>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub website_name: String,
    pub website_type: String,
    pub scroll_image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectOverview {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub website_name: String,
    pub overview: Overview,
}

// ───── Input Candidates ─────────────────────────────────────────────
//
// Request bodies are read leniently: every field is optional and keeps
// whatever JSON arrived in its place, so a missing or mistyped value
// surfaces as a field-level failure instead of a body parse error.
// Embedded entities only deserialize from JSON objects.

type JsonObject = serde_json::Map<String, Value>;

/// A field value as received: the expected shape, or the raw JSON sent
/// instead of it.
#[derive(Debug, Clone)]
pub enum Received<T> {
    Expected(T),
    Mistyped(Value),
}

/// An array whose elements are each checked for shape on their own.
pub type ReceivedList<T> = Received<Vec<Received<T>>>;

impl<'de, T> Deserialize<'de> for Received<T>
where
    T: DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;

        Ok(match T::deserialize(&value) {
            Ok(expected) => Received::Expected(expected),
            Err(_) => Received::Mistyped(value),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "JsonObject")]
pub struct LinkDraft {
    pub link_label: Option<Received<String>>,
    pub url: Option<Received<String>>,
}

/// Raw `lists` element. Anything that is neither a string nor an array of
/// link objects lands in `Malformed` and is rejected by validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListEntryDraft {
    Label(String),
    Links(Vec<LinkDraft>),
    Malformed(Value),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "JsonObject")]
pub struct ProjectInfoDraft {
    pub title: Option<Received<String>>,
    pub list_type: Option<Received<String>>,
    pub lists: Option<Received<Vec<ListEntryDraft>>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "JsonObject")]
pub struct OverviewDraft {
    pub title: Option<Received<String>>,
    pub description: Option<Received<String>>,
    pub project_infos: Option<ReceivedList<ProjectInfoDraft>>,
    pub links: Option<ReceivedList<LinkDraft>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "JsonObject")]
pub struct ImageDraft {
    pub img: Option<Received<String>>,
    pub label: Option<Received<String>>,
}

/// Create-request body. Unknown keys (including `_id`, `createdAt`,
/// `updatedAt`) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "JsonObject")]
pub struct ProjectDraft {
    pub website_name: Option<Received<String>>,
    pub website_type: Option<Received<String>>,
    pub scroll_image_url: Option<Received<String>>,
    pub overview: Option<Received<OverviewDraft>>,
    pub images_url: Option<ReceivedList<ImageDraft>>,
}

/// Update-request body. Each top-level field replaces the stored one
/// wholesale when present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "JsonObject")]
pub struct ProjectPatch {
    pub website_name: OptionField<Received<String>>,
    pub website_type: OptionField<Received<String>>,
    pub scroll_image_url: OptionField<Received<String>>,
    pub overview: OptionField<Received<OverviewDraft>>,
    pub images_url: OptionField<ReceivedList<ImageDraft>>,
}

/// Removes the first present key; `null` counts as absent.
fn take<T>(object: &mut JsonObject, keys: &[&str]) -> Result<Option<T>, serde_json::Error>
where
    T: DeserializeOwned,
{
    match keys.iter().find_map(|key| object.remove(*key)) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value).map(Some),
    }
}

fn take_patch<T>(object: &mut JsonObject, key: &str) -> Result<OptionField<T>, serde_json::Error>
where
    T: DeserializeOwned,
{
    match object.remove(key) {
        None => Ok(OptionField::Unchanged),
        Some(value) => serde_json::from_value(value),
    }
}

impl TryFrom<JsonObject> for LinkDraft {
    type Error = serde_json::Error;

    fn try_from(mut object: JsonObject) -> Result<Self, Self::Error> {
        Ok(LinkDraft {
            link_label: take(&mut object, &["linkLabel", "link_label"])?,
            url: take(&mut object, &["url"])?,
        })
    }
}

impl TryFrom<JsonObject> for ProjectInfoDraft {
    type Error = serde_json::Error;

    fn try_from(mut object: JsonObject) -> Result<Self, Self::Error> {
        Ok(ProjectInfoDraft {
            title: take(&mut object, &["title"])?,
            list_type: take(&mut object, &["listType", "list_type"])?,
            lists: take(&mut object, &["lists"])?,
        })
    }
}

impl TryFrom<JsonObject> for OverviewDraft {
    type Error = serde_json::Error;

    fn try_from(mut object: JsonObject) -> Result<Self, Self::Error> {
        Ok(OverviewDraft {
            title: take(&mut object, &["title"])?,
            description: take(&mut object, &["description"])?,
            project_infos: take(&mut object, &["ProjectInfos", "project_infos"])?,
            links: take(&mut object, &["links"])?,
        })
    }
}

impl TryFrom<JsonObject> for ImageDraft {
    type Error = serde_json::Error;

    fn try_from(mut object: JsonObject) -> Result<Self, Self::Error> {
        Ok(ImageDraft {
            img: take(&mut object, &["img"])?,
            label: take(&mut object, &["label"])?,
        })
    }
}

impl TryFrom<JsonObject> for ProjectDraft {
    type Error = serde_json::Error;

    fn try_from(mut object: JsonObject) -> Result<Self, Self::Error> {
        Ok(ProjectDraft {
            website_name: take(&mut object, &["website_name"])?,
            website_type: take(&mut object, &["website_type"])?,
            scroll_image_url: take(&mut object, &["scroll_image_url"])?,
            overview: take(&mut object, &["overview"])?,
            images_url: take(&mut object, &["images_url"])?,
        })
    }
}

impl TryFrom<JsonObject> for ProjectPatch {
    type Error = serde_json::Error;

    fn try_from(mut object: JsonObject) -> Result<Self, Self::Error> {
        Ok(ProjectPatch {
            website_name: take_patch(&mut object, "website_name")?,
            website_type: take_patch(&mut object, "website_type")?,
            scroll_image_url: take_patch(&mut object, "scroll_image_url")?,
            overview: take_patch(&mut object, "overview")?,
            images_url: take_patch(&mut object, "images_url")?,
        })
    }
}

// ───── Conversions ──────────────────────────────────────────────────

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            website_name: row.website_name,
            website_type: row.website_type,
            scroll_image_url: row.scroll_image_url,
            overview: row.overview.0,
            images_url: row.images_url.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<ProjectOverviewRow> for ProjectOverview {
    fn from(row: ProjectOverviewRow) -> Self {
        ProjectOverview {
            id: row.id,
            website_name: row.website_name,
            overview: row.overview.0,
        }
    }
}

fn expected<T>(value: T) -> Option<Received<T>> {
    Some(Received::Expected(value))
}

fn expected_list<S, D>(items: Vec<S>) -> Option<ReceivedList<D>>
where
    D: From<S>,
{
    expected(
        items
            .into_iter()
            .map(|item| Received::Expected(D::from(item)))
            .collect(),
    )
}

impl From<Link> for LinkDraft {
    fn from(link: Link) -> Self {
        LinkDraft {
            link_label: expected(link.link_label),
            url: expected(link.url),
        }
    }
}

impl From<ListEntry> for ListEntryDraft {
    fn from(entry: ListEntry) -> Self {
        match entry {
            ListEntry::Label(label) => ListEntryDraft::Label(label),
            ListEntry::Links(links) => {
                ListEntryDraft::Links(links.into_iter().map(LinkDraft::from).collect())
            }
        }
    }
}

impl From<ProjectInfo> for ProjectInfoDraft {
    fn from(info: ProjectInfo) -> Self {
        ProjectInfoDraft {
            title: expected(info.title),
            list_type: expected(info.list_type.to_string()),
            lists: expected(info.lists.into_iter().map(ListEntryDraft::from).collect()),
        }
    }
}

impl From<Overview> for OverviewDraft {
    fn from(overview: Overview) -> Self {
        OverviewDraft {
            title: expected(overview.title),
            description: expected(overview.description),
            project_infos: expected_list(overview.project_infos),
            links: expected_list(overview.links),
        }
    }
}

impl From<Image> for ImageDraft {
    fn from(image: Image) -> Self {
        ImageDraft {
            img: expected(image.img),
            label: expected(image.label),
        }
    }
}

impl From<Project> for ProjectDraft {
    fn from(project: Project) -> Self {
        ProjectDraft {
            website_name: expected(project.website_name),
            website_type: expected(project.website_type),
            scroll_image_url: expected(project.scroll_image_url),
            overview: expected(project.overview.into()),
            images_url: expected_list(project.images_url),
        }
    }
}

impl TryFrom<ProjectDraft> for ProjectInsert {
    type Error = Vec<FieldError>;

    fn try_from(value: ProjectDraft) -> Result<Self, Self::Error> {
        validate_project(value)
    }
}

impl ProjectPatch {
    /// Overlays this patch on a stored project, yielding the candidate that
    /// must pass validation before the update is persisted.
    pub fn merge_into(self, current: Project) -> ProjectDraft {
        let current = ProjectDraft::from(current);

        ProjectDraft {
            website_name: self.website_name.apply(current.website_name),
            website_type: self.website_type.apply(current.website_type),
            scroll_image_url: self.scroll_image_url.apply(current.scroll_image_url),
            overview: self.overview.apply(current.overview),
            images_url: self.images_url.apply(current.images_url),
        }
    }
}

impl Project {
    pub fn to_summary(&self) -> ProjectSummary {
        ProjectSummary {
            id: self.id,
            website_name: self.website_name.clone(),
            website_type: self.website_type.clone(),
            scroll_image_url: self.scroll_image_url.clone(),
        }
    }

    pub fn to_overview(&self) -> ProjectOverview {
        ProjectOverview {
            id: self.id,
            website_name: self.website_name.clone(),
            overview: self.overview.clone(),
        }
    }
}
