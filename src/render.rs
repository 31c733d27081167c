//! Renderer configuration and structural markers.
//!
//! The external diff renderer is driven declaratively: an options bundle plus
//! a fixed template set. The templates stamp marker attributes and classes
//! into the emitted tree, and those markers are the sole structural contract
//! between the renderer's output and the row locator — a renderer substitute
//! must preserve them verbatim.

use serde::{Deserialize, Serialize};

/// Diff layout produced by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewStyle {
    /// Two panes, old content left and new content right.
    #[default]
    SideBySide,
    /// One pane with combined old/new rows.
    LineByLine,
}

/// Height of the sticky per-file header, in pixels. Embedders offset scroll
/// anchoring by this much.
pub const DIFF_VIEWER_HEADER_HEIGHT: u32 = 48;

// Marker attributes stamped by the row templates.

/// Content cell for a given line number (canonical row match).
pub const CONTENT_LINE_NUMBER_ATTR: &str = "data-content-for-line-number";
/// Content cell's owning file path.
pub const CONTENT_FILE_PATH_ATTR: &str = "data-content-for-file-path";
/// Per-row annotation hook the embedding UI attaches its trigger to.
pub const ANNOTATION_HOOK_ATTR: &str = "data-annotation-for-line";
/// Set by the mounting caller once a thread widget is mounted on a row.
pub const ANNOTATED_ATTR: &str = "data-annotated";
/// Synthesized placeholder row standing in for a line on the opposite pane.
pub const PLACEHOLDER_LINE_ATTR: &str = "data-place-holder-for-line";
/// File wrapper element's path attribute.
pub const FILE_PATH_ATTR: &str = "data";
/// Line-number marker on the combined old/new number pair.
pub const LINE_NUMBER_ATTR: &str = "data-line-number";

// Container classes emitted by the file templates.

/// Wrapper holding both panes of a side-by-side file diff.
pub const FILES_DIFF_CLASS: &str = "d2h-files-diff";
/// One pane of a side-by-side file diff.
pub const SIDE_PANE_CLASS: &str = "d2h-file-side-diff";
/// Old-content pane marker.
pub const LEFT_PANE_CLASS: &str = "left";
/// New-content pane marker.
pub const RIGHT_PANE_CLASS: &str = "right";
/// Row table body within a pane.
pub const DIFF_BODY_CLASS: &str = "d2h-diff-tbody";
/// Old-side column of the combined line-number pair.
pub const OLD_LINE_NUMBER_CLASS: &str = "line-num1";
/// New-side column of the combined line-number pair.
pub const NEW_LINE_NUMBER_CLASS: &str = "line-num2";
/// Row container tag.
pub const ROW_TAG: &str = "tr";

const GENERIC_LINE_TEMPLATE: &str = r#"
<tr>
  <td class="{{lineClass}} {{type}}">
    {{{lineNumber}}} {{{filePath}}}
  </td>
  <td class="{{type}}" data-content-for-line-number="{{lineNumber}}" data-content-for-file-path="{{file.filePath}}">
      <div data-annotation-for-line="{{lineNumber}}" tab-index="0" role="button">+</div>
      <div class="{{contentClass}}">
      {{#prefix}}
          <span class="d2h-code-line-prefix">{{{prefix}}}</span>
      {{/prefix}}
      {{^prefix}}
          <span class="d2h-code-line-prefix">&nbsp;</span>
      {{/prefix}}
      {{#content}}
          <span class="d2h-code-line-ctn">{{{content}}}</span>
      {{/content}}
      {{^content}}
          <span class="d2h-code-line-ctn"><br></span>
      {{/content}}
      </div>
  </td>
</tr>
"#;

const SIDE_BY_SIDE_FILE_TEMPLATE: &str = r#"
<div id="{{fileHtmlId}}" data="{{file.filePath}}" class="d2h-file-wrapper side-by-side-file-diff" data-lang="{{file.language}}">
  <div class="d2h-file-header">
    {{{filePath}}}
  </div>
  <div class="d2h-files-diff">
      <div class="d2h-file-side-diff left">
          <div class="d2h-code-wrapper">
              <table class="d2h-diff-table" cellpadding="0px" cellspacing="0px">
                  <tbody class="d2h-diff-tbody">
                  {{{diffs.left}}}
                  </tbody>
              </table>
          </div>
      </div>
      <div class="d2h-file-side-diff right">
          <div class="d2h-code-wrapper">
              <table class="d2h-diff-table" cellpadding="0px" cellspacing="0px">
                  <tbody class="d2h-diff-tbody">
                  {{{diffs.right}}}
                  </tbody>
              </table>
          </div>
      </div>
  </div>
</div>
"#;

const LINE_BY_LINE_FILE_TEMPLATE: &str = r#"
<div id="{{fileHtmlId}}" data="{{file.filePath}}" class="d2h-file-wrapper {{file.filePath}} line-by-line-file-diff" data-lang="{{file.language}}">
  <div class="d2h-file-header">
  {{{filePath}}}
  </div>
  <div class="d2h-file-diff">
      <div class="d2h-code-wrapper">
          <table class="d2h-diff-table" cellpadding="0px" cellspacing="0px">
              <tbody class="d2h-diff-tbody">
              {{{diffs}}}
              </tbody>
          </table>
      </div>
  </div>
</div>
"#;

const LINE_BY_LINE_NUMBERS_TEMPLATE: &str = r#"
<div class="line-num1" data-line-number="{{oldNumber}}">{{oldNumber}}</div>
<div class="line-num2" data-line-number="{{newNumber}}">{{newNumber}}</div>
"#;

/// Row and file templates handed to the renderer, keyed by its template names.
#[derive(Debug, Clone, Serialize)]
pub struct RowTemplates {
    #[serde(rename = "generic-line")]
    pub generic_line: &'static str,
    #[serde(rename = "side-by-side-file-diff")]
    pub side_by_side_file_diff: &'static str,
    #[serde(rename = "line-by-line-file-diff")]
    pub line_by_line_file_diff: &'static str,
    #[serde(rename = "line-by-line-numbers")]
    pub line_by_line_numbers: &'static str,
}

impl Default for RowTemplates {
    fn default() -> Self {
        Self {
            generic_line: GENERIC_LINE_TEMPLATE,
            side_by_side_file_diff: SIDE_BY_SIDE_FILE_TEMPLATE,
            line_by_line_file_diff: LINE_BY_LINE_FILE_TEMPLATE,
            line_by_line_numbers: LINE_BY_LINE_NUMBERS_TEMPLATE,
        }
    }
}

/// Options bundle handed to the external renderer at render time.
///
/// Not validated or reinterpreted here; serialized across the embedding
/// boundary as-is.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderConfig {
    pub output_format: ViewStyle,
    pub draw_file_list: bool,
    pub file_list_start_visible: bool,
    pub file_content_toggle: bool,
    /// Line-matching strategy applied by the renderer.
    pub matching: String,
    pub synchronised_scroll: bool,
    pub highlight: bool,
    pub render_nothing_when_empty: bool,
    #[serde(rename = "rawTemplates")]
    pub templates: RowTemplates,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_format: ViewStyle::SideBySide,
            draw_file_list: false,
            file_list_start_visible: false,
            file_content_toggle: true,
            matching: "lines".to_string(),
            synchronised_scroll: true,
            highlight: true,
            render_nothing_when_empty: false,
            templates: RowTemplates::default(),
        }
    }
}
