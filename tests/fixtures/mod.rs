//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::Command;

/// A bronze material with a numeric, a string and a multi-word string parameter.
pub const BRONZE_MTL: &str = "{
  MAT_0042 = {
    Name = BRONZE
    Parameters = {
      {
        Name = TEMPERATURE
        Type = Real
        Default = 0.000000e+00 F
        Access = Full
      },
      {
        Name = PTC_MATERIAL_DESCRIPTION
        Type = String
        Default = 'BRONZE'
        Access = Full
      },
      {
        Name = CONDITION
        Type = String
        Default = 'STAINLESS STEEL'
      }
    }
  }
}
";

/// A steel material sharing TEMPERATURE with [`BRONZE_MTL`] plus an integer parameter.
pub const STEEL_MTL: &str = "{
  MAT_0007 = {
    Name = STEEL
    Parameters = {
      {
        Name = TEMPERATURE
        Type = Real
        Default = 2.000000e+01 C
        Access = Full
      },
      {
        Name = HARDNESS
        Type = Integer
        Default = 150
        Access = Limited
      }
    }
  }
}
";

/// A material whose Real default cannot be parsed.
pub const BROKEN_MTL: &str = "{
  MAT_0099 = {
    Name = BROKEN
    Parameters = {
      {
        Name = DENSITY
        Type = Real
        Default = heavy
      }
    }
  }
}
";

/// Path to the mtlsheet binary
pub fn mtlsheet_bin() -> &'static str {
    env!("CARGO_BIN_EXE_mtlsheet")
}

/// Creates a command with an isolated configuration directory.
pub fn mtlsheet_command(args: &[&str], config_dir: &Path) -> Command {
    let mut cmd = Command::new(mtlsheet_bin());
    cmd.env("MTLSHEET_CONFIG_DIR", config_dir);
    cmd.env_remove("RUST_LOG");
    cmd.args(args);
    cmd
}

/// Writes a material file into `dir` and returns its path.
pub fn write_mtl(dir: &Path, file_name: &str, content: &str) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, content).expect("Failed to write material file");
    path
}

/// Reads one part of a workbook as text.
pub fn read_workbook_part(path: &Path, part: &str) -> String {
    let file = File::open(path).expect("Failed to open workbook");
    let mut archive = zip::ZipArchive::new(file).expect("Workbook should be a zip archive");
    let mut entry = archive.by_name(part).expect("Workbook part missing");
    let mut content = String::new();
    entry
        .read_to_string(&mut content)
        .expect("Workbook part should be UTF-8");
    content
}

/// Reads the worksheet XML of a workbook.
pub fn read_sheet(path: &Path) -> String {
    read_workbook_part(path, "xl/worksheets/sheet1.xml")
}

/// Extracts cell references and their text content from worksheet XML.
///
/// Inline strings and numbers are both returned as their literal text.
pub fn sheet_cells(sheet_xml: &str) -> BTreeMap<String, String> {
    let cell = regex::Regex::new(
        r#"<c r="([A-Z]+[0-9]+)"[^>]*>(?:<is><t[^>]*>(.*?)</t></is>|<v>(.*?)</v>)</c>"#,
    )
    .expect("valid regex");

    cell.captures_iter(sheet_xml)
        .map(|caps| {
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            (caps[1].to_string(), value)
        })
        .collect()
}

/// Extracts the merged ranges from worksheet XML.
pub fn sheet_merges(sheet_xml: &str) -> Vec<String> {
    let merge = regex::Regex::new(r#"<mergeCell ref="([A-Z0-9:]+)"/>"#).expect("valid regex");
    merge
        .captures_iter(sheet_xml)
        .map(|caps| caps[1].to_string())
        .collect()
}
