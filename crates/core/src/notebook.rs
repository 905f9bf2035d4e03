//! Notebook CRUD rules over a room's ordered notebook list.
//!
//! Conflict policy is last-write-wins per notebook: publish replaces
//! content wholesale with no merge or version vector, so concurrent
//! publishers to the same notebook overwrite each other and the last
//! persisted write is what the next poll sees.

use crate::error::CoreError;
use crate::palette;
use crate::room::Notebook;
use crate::types::UnixMillis;

/// Replace the content of the notebook with id `notebook_id` and bump its
/// `lastUpdate`. Sibling notebooks are untouched.
pub fn publish_content(
    notebooks: &mut [Notebook],
    notebook_id: &str,
    content: String,
    now_ms: UnixMillis,
) -> Result<(), CoreError> {
    let notebook = notebooks
        .iter_mut()
        .find(|n| n.id == notebook_id)
        .ok_or_else(|| CoreError::NotebookNotFound(notebook_id.to_string()))?;
    notebook.content = content;
    notebook.last_update = now_ms;
    Ok(())
}

/// Append a new notebook with the given (pre-generated) id.
///
/// The name is trimmed; a trimmed duplicate among siblings is rejected
/// (case-sensitive). The color comes from the palette, cycled by the
/// notebook's ordinal position. Creation order is list order.
pub fn add_notebook(
    notebooks: &mut Vec<Notebook>,
    id: String,
    name: &str,
    now_ms: UnixMillis,
) -> Result<(), CoreError> {
    let name = name.trim();
    if notebooks.iter().any(|n| n.name == name) {
        return Err(CoreError::NotebookNameExists(name.to_string()));
    }
    notebooks.push(Notebook {
        id,
        name: name.to_string(),
        content: String::new(),
        last_update: now_ms,
        color: palette::notebook_color(notebooks.len()).to_string(),
    });
    Ok(())
}

/// Remove the notebook with id `notebook_id`.
///
/// Removing the only notebook is rejected and the list is left untouched;
/// an unknown id is `NotebookNotFound`.
pub fn delete_notebook(notebooks: &mut Vec<Notebook>, notebook_id: &str) -> Result<(), CoreError> {
    let index = notebooks
        .iter()
        .position(|n| n.id == notebook_id)
        .ok_or_else(|| CoreError::NotebookNotFound(notebook_id.to_string()))?;
    if notebooks.len() == 1 {
        return Err(CoreError::CannotDeleteLastNotebook);
    }
    notebooks.remove(index);
    Ok(())
}
