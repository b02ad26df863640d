//! Index service: turns a tag file into search index rows.

use std::collections::BTreeMap;

use crate::error::AppError;
use crate::index::{SearchIndex, WriteSummary};
use crate::models::{ClassifierOptions, EntryType, ResolvedEntry};
use crate::tagfile::{Register, TagFile, WalkStats, Walker};

/// Outcome of indexing one tag file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexReport {
    /// Nodes in the parsed tag file.
    pub nodes: usize,
    pub walk: WalkStats,
    pub write: WriteSummary,
    /// Entries produced per category.
    pub by_type: BTreeMap<EntryType, usize>,
}

/// Runs the classification engine and feeds the writer.
pub struct IndexService {
    register: Register,
    options: ClassifierOptions,
}

impl IndexService {
    /// Service using the bundled classifiers.
    pub fn new(options: ClassifierOptions) -> Self {
        Self::with_register(Register::standard(), options)
    }

    pub fn with_register(register: Register, options: ClassifierOptions) -> Self {
        Self { register, options }
    }

    /// Lazily classify a parsed tag file without writing anything.
    pub fn entries<'a>(&'a self, tagfile: &'a TagFile) -> Walker<'a> {
        tagfile.walk(&self.register, self.options)
    }

    /// Stream every entry of `tagfile` into `index`, keeping existing rows.
    pub fn index(&self, tagfile: &TagFile, index: &mut SearchIndex) -> Result<IndexReport, AppError> {
        self.store(tagfile, |entries| index.write(entries))
    }

    /// Replace the contents of `index` with the entries of `tagfile`.
    ///
    /// Existing rows survive any failure while writing.
    pub fn rebuild(
        &self,
        tagfile: &TagFile,
        index: &mut SearchIndex,
    ) -> Result<IndexReport, AppError> {
        self.store(tagfile, |entries| index.replace(entries))
    }

    fn store<F>(&self, tagfile: &TagFile, sink: F) -> Result<IndexReport, AppError>
    where
        F: FnOnce(&mut dyn Iterator<Item = ResolvedEntry>) -> Result<WriteSummary, AppError>,
    {
        let mut by_type = BTreeMap::new();
        let mut walker = self.entries(tagfile);

        let write = {
            let mut entries = walker.by_ref().inspect(|entry| {
                *by_type.entry(entry.entry_type).or_insert(0) += 1;
            });
            sink(&mut entries)?
        };

        let report = IndexReport {
            nodes: tagfile.node_count(),
            walk: walker.stats(),
            write,
            by_type,
        };

        for (entry_type, count) in &report.by_type {
            tracing::info!("Inserted {} {} entries", count, entry_type);
        }
        tracing::info!(
            "Indexed {} nodes: {} entries written ({} new, {} duplicate), {} nodes skipped",
            report.nodes,
            report.write.written,
            report.write.inserted,
            report.write.ignored,
            report.walk.skipped
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAGS: &str = r#"<tagfile>
  <compound kind="class">
    <name>Foo</name>
    <filename>classFoo.html</filename>
    <member kind="function">
      <type>bool</type>
      <name>Bar</name>
      <anchorfile>classFoo.html</anchorfile>
      <anchor>a1</anchor>
      <arglist>(int x)</arglist>
    </member>
  </compound>
  <compound kind="file">
    <name>foo.h</name>
    <filename>foo_8h.html</filename>
    <member kind="define">
      <type></type>
      <name>FOO_VERSION</name>
      <anchorfile>foo_8h.html</anchorfile>
      <anchor>d1</anchor>
      <arglist></arglist>
    </member>
  </compound>
  <compound kind="dir">
    <name>include</name>
    <path>/src/include/</path>
    <filename>dir_d44c.html</filename>
    <file>foo.h</file>
  </compound>
</tagfile>"#;

    #[test]
    fn test_index_reports_counts() {
        let tagfile = TagFile::parse(TAGS).unwrap();
        let service = IndexService::new(ClassifierOptions::new(true, true));
        let mut index = SearchIndex::in_memory().unwrap();

        let report = service.index(&tagfile, &mut index).unwrap();

        assert_eq!(report.nodes, 5);
        assert_eq!(report.write.written, 4);
        assert_eq!(report.write.inserted, 4);
        assert_eq!(report.walk.skipped, 1);
        assert_eq!(report.by_type.get(&EntryType::Method), Some(&1));
        assert_eq!(report.by_type.get(&EntryType::Macro), Some(&1));
        assert_eq!(report.by_type.get(&EntryType::File), Some(&1));

        let names: Vec<_> = index.entries().unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(
            names,
            vec!["Foo", "Foo::Bar(int x) -> bool", "foo.h", "FOO_VERSION"]
        );
    }

    #[test]
    fn test_reindexing_is_idempotent() {
        let tagfile = TagFile::parse(TAGS).unwrap();
        let service = IndexService::new(ClassifierOptions::default());
        let mut index = SearchIndex::in_memory().unwrap();

        service.index(&tagfile, &mut index).unwrap();
        let second = service.index(&tagfile, &mut index).unwrap();

        assert_eq!(second.write.inserted, 0);
        assert_eq!(second.write.ignored, 4);
        assert_eq!(index.count().unwrap(), 4);
    }

    #[test]
    fn test_rebuild_drops_stale_rows() {
        let tagfile = TagFile::parse(TAGS).unwrap();
        let service = IndexService::new(ClassifierOptions::default());
        let mut index = SearchIndex::in_memory().unwrap();
        index
            .write(vec![ResolvedEntry::new("Stale", EntryType::Class, "classStale.html")])
            .unwrap();

        let report = service.rebuild(&tagfile, &mut index).unwrap();

        assert_eq!(report.write.inserted, 4);
        assert_eq!(index.count().unwrap(), 4);
        assert!(index.entries().unwrap().iter().all(|e| e.name != "Stale"));
    }

    #[test]
    fn test_custom_register() {
        let tagfile = TagFile::parse(TAGS).unwrap();
        let service =
            IndexService::with_register(Register::standard().unregister("file"), ClassifierOptions::default());

        let names: Vec<_> = service.entries(&tagfile).map(|e| e.name).collect();
        // Members of the file are still reached through the fallback.
        assert_eq!(names, vec!["Foo", "Bar", "FOO_VERSION"]);
    }
}
