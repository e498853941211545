//! Combination of finished report PDFs.
//!
//! Pages are copied between `lopdf` documents together with every object
//! they reference (content streams, resources, fonts, images), so each
//! source keeps its own embedded font and renders exactly as before.

mod error;

pub use error::ComposerError;

use lopdf::{Document, Object, ObjectId};
use std::collections::HashMap;

/// State for deep-copying objects from one document into another.
struct ObjectCopier<'a> {
    source_doc: &'a Document,
    target_doc: &'a mut Document,
    id_map: HashMap<ObjectId, ObjectId>,
}

impl<'a> ObjectCopier<'a> {
    fn new(source_doc: &'a Document, target_doc: &'a mut Document) -> Self {
        Self {
            source_doc,
            target_doc,
            id_map: HashMap::new(),
        }
    }

    /// Copies `source_id` and everything reachable from it, once per object.
    fn copy_object(&mut self, source_id: ObjectId) -> Result<ObjectId, lopdf::Error> {
        if let Some(target_id) = self.id_map.get(&source_id) {
            return Ok(*target_id);
        }

        // Reserve the id before recursing; page trees are cyclic (Page -> Parent -> Kids -> Page).
        let new_id = self.target_doc.add_object(Object::Null);
        self.id_map.insert(source_id, new_id);

        let obj = self.source_doc.get_object(source_id)?.clone();
        let new_obj = self.remap_references(obj)?;

        match self.target_doc.objects.get_mut(&new_id) {
            Some(slot) => *slot = new_obj,
            None => return Err(lopdf::Error::ObjectNotFound(new_id)),
        }
        Ok(new_id)
    }

    fn remap_references(&mut self, obj: Object) -> Result<Object, lopdf::Error> {
        match obj {
            Object::Reference(id) => Ok(Object::Reference(self.copy_object(id)?)),
            Object::Array(items) => items
                .into_iter()
                .map(|o| self.remap_references(o))
                .collect::<Result<Vec<_>, _>>()
                .map(Object::Array),
            Object::Dictionary(mut dict) => {
                for (_, value) in dict.iter_mut() {
                    *value = self.remap_references(value.clone())?;
                }
                Ok(Object::Dictionary(dict))
            }
            Object::Stream(mut stream) => {
                for (_, value) in stream.dict.iter_mut() {
                    *value = self.remap_references(value.clone())?;
                }
                Ok(Object::Stream(stream))
            }
            primitive => Ok(primitive),
        }
    }
}

/// Appends every page of `source` to the end of `target`, keeping page order.
///
/// Returns the number of pages appended.
pub fn append_document(target: &mut Document, source: &Document) -> Result<usize, ComposerError> {
    let source_pages = source.get_pages();
    if source_pages.is_empty() {
        return Ok(0);
    }

    let mut copier = ObjectCopier::new(source, target);
    let mut copied_page_ids = Vec::with_capacity(source_pages.len());
    // `get_pages` is keyed by 1-based page number, so iteration is in order.
    for page_id in source_pages.values() {
        copied_page_ids.push(copier.copy_object(*page_id)?);
    }

    let root_id = target.trailer.get(b"Root")?.as_reference()?;
    let pages_id = target.get_object(root_id)?.as_dict()?.get(b"Pages")?.as_reference()?;
    let pages_dict = target.get_object_mut(pages_id)?.as_dict_mut()?;

    let mut kids = pages_dict.get(b"Kids")?.as_array()?.clone();
    let original_count = pages_dict.get(b"Count")?.as_i64()?;
    kids.extend(copied_page_ids.iter().map(|id| Object::Reference(*id)));
    pages_dict.set("Kids", Object::Array(kids));
    pages_dict.set("Count", original_count + copied_page_ids.len() as i64);

    for page_id in &copied_page_ids {
        if let Ok(Object::Dictionary(page_dict)) = target.get_object_mut(*page_id) {
            page_dict.set("Parent", Object::Reference(pages_id));
        }
    }

    Ok(copied_page_ids.len())
}

/// Merges serialized PDFs, in the given order, into one serialized PDF.
///
/// At least two inputs are required. The first document's catalog and
/// information dictionary are kept.
pub fn combine_documents(inputs: &[&[u8]]) -> Result<Vec<u8>, ComposerError> {
    if inputs.len() < 2 {
        return Err(ComposerError::InvalidInput(format!(
            "at least two documents are required to combine, got {}",
            inputs.len()
        )));
    }

    let load = |index: usize, bytes: &[u8]| {
        Document::load_mem(bytes).map_err(|e| ComposerError::Unreadable {
            index,
            message: e.to_string(),
        })
    };

    let mut target = load(0, inputs[0])?;
    let mut total_pages = target.get_pages().len();
    for (index, bytes) in inputs.iter().enumerate().skip(1) {
        let source = load(index, bytes)?;
        total_pages += append_document(&mut target, &source)?;
    }

    // Drops the copied source page trees that no longer hang off the catalog.
    target.prune_objects();

    let mut buffer = Vec::new();
    target.save_to(&mut buffer)?;
    log::info!(
        "Combined {} documents into {} pages ({} bytes)",
        inputs.len(),
        total_pages,
        buffer.len()
    );
    Ok(buffer)
}
