//! Incremental placement of materials into a grid.

use super::{
    LayoutOptions, ParameterIndex, ACCESS_COLUMN, COLUMN_STRIDE, ID_ROW, NAME_COLUMN, NAME_ROW,
    TYPE_COLUMN,
};
use crate::constants::{ID_LABEL, LABEL_HEADERS, MATERIAL_LABEL, VALUE_HEADERS};
use crate::grid::{CellValue, Grid};
use crate::models::{MaterialRecord, ParameterTable};
use anyhow::Result;
use tracing::debug;

/// Writes materials into a grid, one column block per material name.
///
/// Materials are stored one at a time with [`store`](Self::store); rows for
/// parameter names are assigned as they are discovered. [`finalize`](Self::finalize)
/// writes the label columns once every material has been stored.
#[derive(Debug)]
pub struct LayoutEngine<G: Grid> {
    grid: G,
    index: ParameterIndex,
    options: LayoutOptions,
    next_col: u32,
    materials_stored: usize,
}

impl<G: Grid> LayoutEngine<G> {
    /// Creates an engine writing into `grid`.
    ///
    /// # Errors
    ///
    /// Returns an error if `options` would overlap the header rows or label columns.
    pub fn new(grid: G, options: LayoutOptions) -> Result<Self> {
        options.validate()?;

        Ok(Self {
            grid,
            index: ParameterIndex::new(options.first_parameter_row),
            options,
            next_col: options.first_material_column,
            materials_stored: 0,
        })
    }

    /// Stores all material names filed under one material id.
    ///
    /// The id is written once and merged across the blocks of all its names.
    /// An id without names occupies no columns and is not written.
    pub fn store<'a, I>(&mut self, material_id: &str, names: I)
    where
        I: IntoIterator<Item = (&'a str, &'a ParameterTable)>,
    {
        let mut names = names.into_iter().peekable();
        if names.peek().is_none() {
            debug!(material_id, "material has no names, nothing stored");
            return;
        }

        let start_col = self.next_col;
        self.grid.set_cell(ID_ROW, start_col, material_id.into());

        for (material_name, parameters) in names {
            write_material_block(
                &mut self.grid,
                &mut self.index,
                self.options.header_row(),
                self.next_col,
                material_name,
                parameters,
            );
            self.next_col = self.next_col.saturating_add(COLUMN_STRIDE);
            self.materials_stored += 1;
        }

        if self.next_col > start_col {
            self.grid.merge_row_span(ID_ROW, start_col, self.next_col - 1);
        }

        debug!(
            material_id,
            first_column = start_col,
            next_column = self.next_col,
            parameters = self.index.len(),
            "stored material"
        );
    }

    /// Stores a single parsed material.
    pub fn store_record(&mut self, record: &MaterialRecord) {
        self.store(
            &record.material_id,
            [(record.material_name.as_str(), &record.parameters)],
        );
    }

    /// Writes parameter labels and captions.
    ///
    /// Call after the last [`store`](Self::store). Calling it again rewrites the
    /// same cells.
    pub fn finalize(&mut self) {
        let header_row = self.options.header_row();

        self.grid.set_cell(ID_ROW, NAME_COLUMN, ID_LABEL.into());
        self.grid.set_cell(NAME_ROW, NAME_COLUMN, MATERIAL_LABEL.into());
        for (col, caption) in [NAME_COLUMN, TYPE_COLUMN, ACCESS_COLUMN]
            .into_iter()
            .zip(LABEL_HEADERS)
        {
            self.grid.set_cell(header_row, col, caption.into());
        }

        for (name, entry) in self.index.iter() {
            self.grid.set_cell(entry.row, NAME_COLUMN, name.into());
            self.grid
                .set_cell(entry.row, TYPE_COLUMN, non_empty(entry.param_type.as_str()));
            self.grid
                .set_cell(entry.row, ACCESS_COLUMN, entry.access.as_deref().into());
        }
    }

    /// Finalizes and hands back the grid.
    pub fn finish(mut self) -> G {
        self.finalize();
        self.grid
    }

    /// The grid written so far.
    pub fn grid(&self) -> &G {
        &self.grid
    }

    /// The parameter row assignments made so far.
    pub fn index(&self) -> &ParameterIndex {
        &self.index
    }

    /// The layout options in use.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Column the next material block will start at.
    pub fn next_column(&self) -> u32 {
        self.next_col
    }

    /// Number of material-name blocks written.
    pub fn materials_stored(&self) -> usize {
        self.materials_stored
    }
}

/// Writes one material-name block at `col` and its values on their index rows.
fn write_material_block<G: Grid>(
    grid: &mut G,
    index: &mut ParameterIndex,
    header_row: u32,
    col: u32,
    material_name: &str,
    parameters: &ParameterTable,
) {
    grid.set_cell(NAME_ROW, col, material_name.into());
    grid.merge_row_span(NAME_ROW, col, col + COLUMN_STRIDE - 1);
    grid.set_cell(header_row, col, VALUE_HEADERS[0].into());
    grid.set_cell(header_row, col + 1, VALUE_HEADERS[1].into());

    for (name, parameter) in parameters {
        let row = index.assign_or_get(name, &parameter.param_type, parameter.access.as_deref());
        grid.set_cell(row, col, CellValue::from(&parameter.default));
        grid.set_cell(row, col + 1, parameter.unit.as_deref().into());
    }
}

fn non_empty(text: &str) -> CellValue {
    if text.is_empty() {
        CellValue::Empty
    } else {
        text.into()
    }
}
