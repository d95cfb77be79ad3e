//! Course structure client and models.
//!
//! Wraps `GET /api/courses/v1/blocks/`, returning the course block tree the
//! given user can see. Querying with a staff username can reveal modules
//! hidden from students.

use std::collections::HashMap;

use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::clients::HttpClient;

/// A single block within the course structure.
#[derive(Clone, Debug, Default)]
pub struct Block {
    /// Usage id of the block.
    pub id: String,
    /// Display title of the block.
    pub display_name: Option<String>,
    /// Block type (e.g. `course`, `chapter`, `vertical`).
    pub block_type: Option<String>,
    /// Usage ids of this block's children, in course order.
    pub children: Vec<String>,
    /// Whether the block is restricted to staff.
    ///
    /// Non-staff responses omit the field entirely, so absence means
    /// visible.
    pub visible_to_staff_only: bool,
}

impl Block {
    /// Returns whether the block is visible to non-staff users.
    #[must_use]
    pub const fn visible(&self) -> bool {
        !self.visible_to_staff_only
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawBlock {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default, rename = "type")]
    block_type: Option<String>,
    #[serde(default)]
    children: Vec<String>,
    #[serde(default)]
    visible_to_staff_only: bool,
}

#[derive(Debug, Default, Deserialize)]
struct RawStructure {
    #[serde(default)]
    root: Option<String>,
    #[serde(default)]
    blocks: HashMap<String, RawBlock>,
}

/// The course structure: a tree of blocks addressed by usage id.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(from = "RawStructure")]
pub struct Structure {
    root: Option<String>,
    blocks: HashMap<String, Block>,
}

impl From<RawStructure> for Structure {
    fn from(raw: RawStructure) -> Self {
        let blocks = raw
            .blocks
            .into_iter()
            .map(|(id, block)| {
                (
                    id.clone(),
                    Block {
                        id,
                        display_name: block.display_name,
                        block_type: block.block_type,
                        children: block.children,
                        visible_to_staff_only: block.visible_to_staff_only,
                    },
                )
            })
            .collect();
        Self {
            root: raw.root,
            blocks,
        }
    }
}

impl Structure {
    /// Returns the root block of the course, if the payload names one.
    #[must_use]
    pub fn root(&self) -> Option<&Block> {
        self.root.as_deref().and_then(|id| self.blocks.get(id))
    }

    /// Returns the block with the given usage id.
    #[must_use]
    pub fn block(&self, block_id: &str) -> Option<&Block> {
        self.blocks.get(block_id)
    }

    /// Returns all the blocks in the structure, in no particular order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values()
    }

    /// Returns the resolved children of a block, skipping dangling ids.
    #[must_use]
    pub fn children_of(&self, block: &Block) -> Vec<&Block> {
        block
            .children
            .iter()
            .filter_map(|id| self.blocks.get(id))
            .collect()
    }
}

/// Course structure client.
#[derive(Clone, Copy, Debug)]
pub struct CourseStructure<'a> {
    client: &'a HttpClient,
}

impl<'a> CourseStructure<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Fetches the full course block tree on behalf of the given user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on any non-2xx response.
    pub async fn course_blocks(
        &self,
        course_id: &str,
        username: &str,
    ) -> Result<Structure, ApiError> {
        let mut query = HashMap::new();
        query.insert("depth".to_string(), "all".to_string());
        query.insert("username".to_string(), username.to_string());
        query.insert("course_id".to_string(), course_id.to_string());
        query.insert(
            "requested_fields".to_string(),
            "children,display_name,id,type,visible_to_staff_only".to_string(),
        );

        let response = self
            .client
            .get("/api/courses/v1/blocks/", Some(query))
            .await?
            .error_for_status()?;

        Ok(serde_json::from_value(response.body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn structure() -> Structure {
        serde_json::from_value(json!({
            "root": "block-v1:edX+DemoX+Demo_Course+type@course+block@course",
            "blocks": {
                "block-v1:edX+DemoX+Demo_Course+type@course+block@course": {
                    "display_name": "Demonstration Course",
                    "type": "course",
                    "children": [
                        "block-v1:edX+DemoX+Demo_Course+type@chapter+block@intro",
                        "block-v1:edX+DemoX+Demo_Course+type@chapter+block@hidden",
                    ],
                },
                "block-v1:edX+DemoX+Demo_Course+type@chapter+block@intro": {
                    "display_name": "Introduction",
                    "type": "chapter",
                },
                "block-v1:edX+DemoX+Demo_Course+type@chapter+block@hidden": {
                    "display_name": "Staff Only",
                    "type": "chapter",
                    "visible_to_staff_only": true,
                },
            },
        }))
        .unwrap()
    }

    #[test]
    fn test_root_block_resolves() {
        let structure = structure();
        let root = structure.root().unwrap();
        assert_eq!(root.display_name.as_deref(), Some("Demonstration Course"));
        assert_eq!(root.block_type.as_deref(), Some("course"));
    }

    #[test]
    fn test_children_resolve_in_order() {
        let structure = structure();
        let root = structure.root().unwrap();
        let children = structure.children_of(root);
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].display_name.as_deref(), Some("Introduction"));
    }

    #[test]
    fn test_visibility_defaults_to_visible() {
        let structure = structure();
        let intro = structure
            .block("block-v1:edX+DemoX+Demo_Course+type@chapter+block@intro")
            .unwrap();
        let hidden = structure
            .block("block-v1:edX+DemoX+Demo_Course+type@chapter+block@hidden")
            .unwrap();
        assert!(intro.visible());
        assert!(!hidden.visible());
    }

    #[test]
    fn test_blocks_iterates_all() {
        assert_eq!(structure().blocks().count(), 3);
    }

    #[test]
    fn test_dangling_children_are_skipped() {
        let structure: Structure = serde_json::from_value(json!({
            "root": "a",
            "blocks": {
                "a": {"display_name": "A", "type": "course", "children": ["missing"]},
            },
        }))
        .unwrap();
        let root = structure.root().unwrap();
        assert!(structure.children_of(root).is_empty());
    }
}
