use super::*;
use crate::error::LintDeltaError;

// ============================================================================
// DiffModel parsing
// ============================================================================

/// Test parsing a simple mixed hunk with header metadata around it.
#[test]
fn test_parse_simple_hunk() {
    let diff = r#"diff --git a/src/app.py b/src/app.py
index abc1234..def5678 100644
--- a/src/app.py
+++ b/src/app.py
@@ -10,2 +10,3 @@ def main():
-    old_line_a
-    old_line_b
+    new_line_a
+    new_line_b
+    new_line_c
"#;

    let model = DiffModel::parse(diff).unwrap();

    assert_eq!(model.file.as_deref(), Some("src/app.py"));
    assert_eq!(model.hunks.len(), 1);

    let hunk = &model.hunks[0];
    assert_eq!(hunk.old_start, 10);
    assert_eq!(hunk.old_count, 2);
    assert_eq!(hunk.new_start, 10);
    assert_eq!(hunk.new_count, 3);
    assert_eq!(hunk.lines.len(), 5);
    assert_eq!(hunk.lines[0], DiffLine::Removed("    old_line_a".to_string()));
    assert_eq!(hunk.lines[2], DiffLine::Added("    new_line_a".to_string()));
}

/// Counts omitted from the hunk header default to 1.
#[test]
fn test_parse_hunk_header_default_counts() {
    let diff = "--- a/f\n+++ b/f\n@@ -3 +3 @@\n-old\n+new\n";

    let model = DiffModel::parse(diff).unwrap();

    let hunk = &model.hunks[0];
    assert_eq!((hunk.old_start, hunk.old_count), (3, 1));
    assert_eq!((hunk.new_start, hunk.new_count), (3, 1));
}

#[test]
fn test_parse_context_lines() {
    let diff = "--- a/f\n+++ b/f\n@@ -1,2 +1,3 @@\n line1\n+line2new\n line2\n";

    let model = DiffModel::parse(diff).unwrap();

    let hunk = &model.hunks[0];
    assert_eq!(hunk.lines[0], DiffLine::Context("line1".to_string()));
    assert_eq!(hunk.lines[1], DiffLine::Added("line2new".to_string()));
    assert_eq!(hunk.lines[2], DiffLine::Context("line2".to_string()));
}

/// Empty input is valid and yields an empty model, not an error.
#[test]
fn test_parse_empty_input() {
    let model = DiffModel::parse("").unwrap();
    assert!(model.is_empty());
    assert_eq!(model.file, None);

    let model = DiffModel::parse("\n\n").unwrap();
    assert!(model.is_empty());
}

#[test]
fn test_parse_multiple_hunks() {
    let diff = "\
--- a/f
+++ b/f
@@ -1,1 +1,2 @@
 keep
+added
@@ -10,2 +11,1 @@
-gone_a
-gone_b
+replacement
";

    let model = DiffModel::parse(diff).unwrap();

    assert_eq!(model.hunks.len(), 2);
    assert_eq!(model.hunks[1].old_start, 10);
    assert_eq!(model.hunks[1].new_start, 11);
}

/// The no-newline marker annotates the previous line and counts toward
/// neither side.
#[test]
fn test_parse_no_newline_marker() {
    let diff = "\
--- a/f
+++ b/f
@@ -3 +3 @@
-old version
\\ No newline at end of file
+new version
\\ No newline at end of file
";

    let model = DiffModel::parse(diff).unwrap();

    let hunk = &model.hunks[0];
    assert_eq!(hunk.lines.len(), 2);
    assert_eq!(hunk.lines[0], DiffLine::Removed("old version".to_string()));
    assert_eq!(hunk.lines[1], DiffLine::Added("new version".to_string()));
}

/// Added body content that itself starts with diff markers must not be
/// mistaken for headers while the hunk is incomplete.
#[test]
fn test_parse_content_with_diff_markers() {
    let diff = "\
--- a/f
+++ b/f
@@ -5,0 +6,3 @@
+++ this line starts with plus
+-- this line starts with minus
+@@ this looks like a header
";

    let model = DiffModel::parse(diff).unwrap();

    let hunk = &model.hunks[0];
    assert_eq!(
        hunk.lines[0],
        DiffLine::Added("++ this line starts with plus".to_string())
    );
    assert_eq!(
        hunk.lines[1],
        DiffLine::Added("-- this line starts with minus".to_string())
    );
    assert_eq!(
        hunk.lines[2],
        DiffLine::Added("@@ this looks like a header".to_string())
    );
}

#[test]
fn test_parse_body_before_hunk_is_error() {
    let diff = "--- a/f\n+++ b/f\n+stray added line\n";

    let err = DiffModel::parse(diff).unwrap_err();
    assert!(matches!(err, LintDeltaError::MalformedDiff(_)));
}

#[test]
fn test_parse_invalid_hunk_header_is_error() {
    for bad in ["@@ nonsense @@\n", "@@ -1,2 @@\n", "@@ -x +y @@\n", "@@ -1 +1\n"] {
        let diff = format!("--- a/f\n+++ b/f\n{}", bad);
        let err = DiffModel::parse(&diff).unwrap_err();
        assert!(
            matches!(err, LintDeltaError::MalformedDiff(_)),
            "expected MalformedDiff for header {:?}",
            bad
        );
    }
}

/// Fewer body lines than the header declares is a count mismatch.
#[test]
fn test_parse_truncated_hunk_is_error() {
    let diff = "--- a/f\n+++ b/f\n@@ -1,2 +1,2 @@\n line1\n";

    let err = DiffModel::parse(diff).unwrap_err();
    assert!(matches!(err, LintDeltaError::MalformedDiff(_)));
}

/// More body lines than the header declares is also a count mismatch:
/// the extra line lands outside any hunk.
#[test]
fn test_parse_overlong_hunk_is_error() {
    let diff = "--- a/f\n+++ b/f\n@@ -1,1 +1,1 @@\n line1\n line2\n";

    let err = DiffModel::parse(diff).unwrap_err();
    assert!(matches!(err, LintDeltaError::MalformedDiff(_)));
}

/// A deleted file (+++ /dev/null) is labeled with the old-side path.
#[test]
fn test_parse_deleted_file_uses_old_path() {
    let diff = "\
--- a/src/gone.py
+++ /dev/null
@@ -1,2 +0,0 @@
-line one
-line two
";

    let model = DiffModel::parse(diff).unwrap();
    assert_eq!(model.file.as_deref(), Some("src/gone.py"));
}

/// Header paths may carry a tab-separated timestamp (classic diff -u).
#[test]
fn test_parse_header_with_timestamp() {
    let diff = "--- a/f.py\t2026-01-01 10:00:00\n+++ b/f.py\t2026-01-02 10:00:00\n@@ -1 +1 @@\n-a\n+b\n";

    let model = DiffModel::parse(diff).unwrap();
    assert_eq!(model.file.as_deref(), Some("f.py"));
}

#[test]
fn test_parse_many_splits_on_git_headers() {
    let diff = "\
diff --git a/one.py b/one.py
--- a/one.py
+++ b/one.py
@@ -1 +1 @@
-a
+b
diff --git a/two.py b/two.py
--- a/two.py
+++ b/two.py
@@ -5 +5,2 @@
 keep
+add
";

    let models = DiffModel::parse_many(diff).unwrap();

    assert_eq!(models.len(), 2);
    assert_eq!(models[0].file.as_deref(), Some("one.py"));
    assert_eq!(models[1].file.as_deref(), Some("two.py"));
    assert_eq!(models[1].hunks[0].new_count, 2);
}

#[test]
fn test_parse_many_single_file_without_git_header() {
    let diff = "--- a/f\n+++ b/f\n@@ -1 +1 @@\n-a\n+b\n";

    let models = DiffModel::parse_many(diff).unwrap();
    assert_eq!(models.len(), 1);
}

#[test]
fn test_parse_many_empty_input() {
    assert!(DiffModel::parse_many("").unwrap().is_empty());
}

// ============================================================================
// LineMap
// ============================================================================

fn map_for(diff: &str) -> LineMap {
    LineMap::new(&DiffModel::parse(diff).unwrap())
}

/// Context lines map to their counterparts, added lines map to nothing,
/// and lines after the hunk shift by the accumulated offset.
#[test]
fn test_map_insertion_shifts_following_lines() {
    let map = map_for("--- a/f\n+++ b/f\n@@ -1,2 +1,3 @@\n line1\n+line2new\n line2\n");

    assert_eq!(map.map_new_to_old(1), Some(1));
    assert_eq!(map.map_new_to_old(2), None);
    assert_eq!(map.map_new_to_old(3), Some(2));
    // Open-ended region past the hunk: new lines trail old lines by one.
    assert_eq!(map.map_new_to_old(4), Some(3));
    assert_eq!(map.map_new_to_old(100), Some(99));

    assert_eq!(map.map_old_to_new(1), Some(1));
    assert_eq!(map.map_old_to_new(2), Some(3));
    assert_eq!(map.map_old_to_new(50), Some(51));
}

#[test]
fn test_map_removed_lines_have_no_new_counterpart() {
    let map = map_for("--- a/f\n+++ b/f\n@@ -10,2 +9,0 @@\n-gone_a\n-gone_b\n");

    assert_eq!(map.map_old_to_new(10), None);
    assert_eq!(map.map_old_to_new(11), None);
    // Lines before the hunk are untouched.
    assert_eq!(map.map_old_to_new(9), Some(9));
    // Lines after the deletion move up by two.
    assert_eq!(map.map_old_to_new(12), Some(10));
    assert_eq!(map.map_new_to_old(10), Some(12));
}

/// A zero-count old range declares the line before the insertion point.
#[test]
fn test_map_pure_insertion_hunk() {
    let map = map_for("--- a/f\n+++ b/f\n@@ -5,0 +6,2 @@\n+new_a\n+new_b\n");

    assert_eq!(map.map_new_to_old(5), Some(5));
    assert_eq!(map.map_new_to_old(6), None);
    assert_eq!(map.map_new_to_old(7), None);
    assert_eq!(map.map_new_to_old(8), Some(6));
    assert_eq!(map.map_old_to_new(6), Some(8));
}

/// Offsets accumulate across hunks; gaps between hunks use the running
/// offset of the hunks seen so far.
#[test]
fn test_map_accumulates_offsets_across_hunks() {
    let map = map_for(
        "\
--- a/f
+++ b/f
@@ -1,1 +1,2 @@
 keep
+added
@@ -10,2 +11,1 @@
-gone_a
-gone_b
+replacement
",
    );

    // Gap between the hunks: new trails old by one.
    assert_eq!(map.map_new_to_old(5), Some(4));
    assert_eq!(map.map_new_to_old(10), Some(9));
    // Inside the second hunk.
    assert_eq!(map.map_new_to_old(11), None);
    assert_eq!(map.map_old_to_new(10), None);
    assert_eq!(map.map_old_to_new(11), None);
    // After the second hunk the offsets cancel out.
    assert_eq!(map.map_new_to_old(12), Some(12));
    assert_eq!(map.map_old_to_new(12), Some(12));
}

/// For an empty diff every line maps to None on both sides: no baseline.
#[test]
fn test_map_empty_model_has_no_baseline() {
    let map = LineMap::new(&DiffModel::default());

    for line in [1, 2, 5, 100] {
        assert_eq!(map.map_new_to_old(line), None);
        assert_eq!(map.map_old_to_new(line), None);
    }
}

#[test]
fn test_map_line_zero_is_unmapped() {
    let map = map_for("--- a/f\n+++ b/f\n@@ -1 +1 @@\n-a\n+b\n");
    assert_eq!(map.map_new_to_old(0), None);
    assert_eq!(map.map_old_to_new(0), None);
}

/// map_new_to_old and map_old_to_new are mutual partial inverses.
#[test]
fn test_map_directions_are_mutual_inverses() {
    let map = map_for(
        "\
--- a/f
+++ b/f
@@ -3,4 +3,2 @@
 ctx_a
-gone_a
-gone_b
 ctx_b
@@ -12,1 +10,3 @@
 ctx_c
+new_a
+new_b
",
    );

    for new_line in 1..=40 {
        if let Some(old_line) = map.map_new_to_old(new_line) {
            assert_eq!(
                map.map_old_to_new(old_line),
                Some(new_line),
                "round trip failed for new line {}",
                new_line
            );
        }
    }
    for old_line in 1..=40 {
        if let Some(new_line) = map.map_old_to_new(old_line) {
            assert_eq!(
                map.map_new_to_old(new_line),
                Some(old_line),
                "round trip failed for old line {}",
                old_line
            );
        }
    }
}
