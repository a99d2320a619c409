//! In-memory indexed view over one loaded catalog.
//!
//! A [`Registry`] is built once from raw template and image lists and never
//! mutated afterwards. Refreshing the catalog means building a new registry
//! and swapping the reference readers hold.

use std::collections::HashMap;

use crate::catalog::{ImageRecord, Template};

/// Indexed, read-only catalog snapshot.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    templates: Vec<Template>,
    images: Vec<ImageRecord>,
    /// Index into `templates`; the last template with a given id wins.
    template_by_id: HashMap<String, usize>,
    /// Indices into `images`, grouped by `template_id`, in insertion order.
    images_by_template_id: HashMap<String, Vec<usize>>,
    image_by_id: HashMap<String, usize>,
    duplicate_template_ids: Vec<String>,
}

impl Registry {
    /// Build all lookup indices from raw catalog lists.
    ///
    /// Never fails. Duplicate template ids resolve last-write-wins and are
    /// recorded in [`Registry::duplicate_template_ids`]. Images referencing an
    /// unknown template are still indexed.
    pub fn build(templates: Vec<Template>, images: Vec<ImageRecord>) -> Self {
        let mut template_by_id = HashMap::with_capacity(templates.len());
        let mut duplicate_template_ids = Vec::new();

        for (idx, template) in templates.iter().enumerate() {
            if template_by_id.insert(template.id.clone(), idx).is_some()
                && !duplicate_template_ids.contains(&template.id)
            {
                duplicate_template_ids.push(template.id.clone());
            }
        }

        let mut images_by_template_id: HashMap<String, Vec<usize>> = HashMap::new();
        let mut image_by_id = HashMap::with_capacity(images.len());

        for (idx, image) in images.iter().enumerate() {
            image_by_id.insert(image.id.clone(), idx);
            images_by_template_id
                .entry(image.template_id.clone())
                .or_default()
                .push(idx);
        }

        Self {
            templates,
            images,
            template_by_id,
            images_by_template_id,
            image_by_id,
            duplicate_template_ids,
        }
    }

    /// All templates in load order, duplicates included.
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// All image records in load order.
    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }

    pub fn template(&self, id: &str) -> Option<&Template> {
        self.template_by_id.get(id).map(|&idx| &self.templates[idx])
    }

    pub fn image(&self, id: &str) -> Option<&ImageRecord> {
        self.image_by_id.get(id).map(|&idx| &self.images[idx])
    }

    /// Images rendered from `template_id`, in load order.
    pub fn images_for_template<'a>(
        &'a self,
        template_id: &str,
    ) -> impl Iterator<Item = &'a ImageRecord> + 'a {
        self.images_by_template_id
            .get(template_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|&idx| &self.images[idx])
    }

    /// Number of images indexed under `template_id`.
    pub fn image_count(&self, template_id: &str) -> usize {
        self.images_by_template_id
            .get(template_id)
            .map_or(0, Vec::len)
    }

    /// Template ids that appeared more than once in the input, in first-seen order.
    pub fn duplicate_template_ids(&self) -> &[String] {
        &self.duplicate_template_ids
    }

    /// Ids of images whose `template_id` matches no known template.
    pub fn orphan_image_ids(&self) -> Vec<&str> {
        self.images
            .iter()
            .filter(|img| !self.template_by_id.contains_key(&img.template_id))
            .map(|img| img.id.as_str())
            .collect()
    }

    /// Number of distinct template ids.
    pub fn template_count(&self) -> usize {
        self.template_by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty() && self.images.is_empty()
    }
}
