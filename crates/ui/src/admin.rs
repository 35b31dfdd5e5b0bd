//! Tab/section administration state machine
//!
//! ```text
//! Viewing ── begin_create_* / begin_edit_* ──▶ Editing ── submit ──▶ Submitting
//!    ▲                                           ▲  │                    │
//!    │                                           │  cancel               │ finish(Err) (edit)
//!    │◀──────────────────────────────────────────┼──┘                    │
//!    │                                           └───────────────────────┤
//!    │◀── finish(Ok) / finish(Err) (delete) ─────────────────────────────┘
//!    │
//! Viewing ── begin_delete_* ──▶ Deleting ── submit ──▶ Submitting
//! ```
//!
//! The editor never touches the tree itself. A successful submission is
//! followed by a re-fetch, and the view renders whatever the server returns.

use edutalks_client::Mutation;
use edutalks_core::{
    PortalError, PortalResult, Position, SectionId, TabId, Validatable, next_position,
};
use edutalks_taxonomy::{
    SectionInput, TabInput, TaxonomyTree, ensure_section_slug_available,
    ensure_tab_slug_available,
};

// ============================================================================
// Targets and forms
// ============================================================================

/// What an open form edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    NewTab,
    Tab(TabId),
    NewSection(TabId),
    Section { tab: TabId, section: SectionId },
}

impl EditTarget {
    pub fn is_new(&self) -> bool {
        matches!(self, EditTarget::NewTab | EditTarget::NewSection(_))
    }

    /// Dialog heading
    pub fn heading(&self) -> &'static str {
        match self {
            EditTarget::NewTab => "Create Tab",
            EditTarget::Tab(_) => "Edit Tab",
            EditTarget::NewSection(_) => "Create Section",
            EditTarget::Section { .. } => "Edit Section",
        }
    }
}

/// Form contents, pre-filled when editing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorForm {
    Tab(TabInput),
    Section(SectionInput),
}

impl EditorForm {
    pub fn title(&self) -> &str {
        match self {
            EditorForm::Tab(input) => &input.title,
            EditorForm::Section(input) => &input.title,
        }
    }

    pub fn slug(&self) -> &str {
        match self {
            EditorForm::Tab(input) => &input.slug,
            EditorForm::Section(input) => &input.slug,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            EditorForm::Tab(input) => input.position,
            EditorForm::Section(input) => input.position,
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            EditorForm::Tab(input) => input.is_active,
            EditorForm::Section(input) => input.is_active,
        }
    }

    pub fn set_title(&mut self, title: String) {
        match self {
            EditorForm::Tab(input) => input.title = title,
            EditorForm::Section(input) => input.title = title,
        }
    }

    pub fn set_slug(&mut self, slug: String) {
        match self {
            EditorForm::Tab(input) => input.slug = slug,
            EditorForm::Section(input) => input.slug = slug,
        }
    }

    pub fn set_position(&mut self, position: Position) {
        match self {
            EditorForm::Tab(input) => input.position = position,
            EditorForm::Section(input) => input.position = position,
        }
    }

    pub fn set_active(&mut self, is_active: bool) {
        match self {
            EditorForm::Tab(input) => input.is_active = is_active,
            EditorForm::Section(input) => input.is_active = is_active,
        }
    }

    /// Section description; tabs have none
    pub fn description(&self) -> Option<&str> {
        match self {
            EditorForm::Tab(_) => None,
            EditorForm::Section(input) => input.description.as_deref(),
        }
    }

    pub fn set_description(&mut self, description: String) {
        if let EditorForm::Section(input) = self {
            input.description = Some(description);
        }
    }

    /// Trimmed copy; an empty description becomes `None`
    fn normalized(&self) -> Self {
        match self {
            EditorForm::Tab(input) => EditorForm::Tab(TabInput {
                title: input.title.trim().to_string(),
                slug: input.slug.trim().to_string(),
                ..input.clone()
            }),
            EditorForm::Section(input) => EditorForm::Section(SectionInput {
                title: input.title.trim().to_string(),
                slug: input.slug.trim().to_string(),
                description: input
                    .description
                    .as_deref()
                    .map(str::trim)
                    .filter(|d| !d.is_empty())
                    .map(str::to_string),
                ..input.clone()
            }),
        }
    }

    fn validate(&self) -> PortalResult<()> {
        match self {
            EditorForm::Tab(input) => input.validate(),
            EditorForm::Section(input) => input.validate(),
        }
    }
}

/// What a confirmation dialog would delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Tab {
        id: TabId,
        title: String,
        section_count: usize,
    },
    Section {
        tab: TabId,
        id: SectionId,
        title: String,
        docs_count: u64,
    },
}

impl DeleteTarget {
    pub fn title(&self) -> &str {
        match self {
            DeleteTarget::Tab { title, .. } | DeleteTarget::Section { title, .. } => title,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DeleteTarget::Tab { .. } => "tab",
            DeleteTarget::Section { .. } => "section",
        }
    }

    fn mutation(&self) -> Mutation {
        match self {
            DeleteTarget::Tab { id, .. } => Mutation::DeleteTab(*id),
            DeleteTarget::Section { id, .. } => Mutation::DeleteSection(*id),
        }
    }
}

// ============================================================================
// Phases
// ============================================================================

/// Where a failed submission returns to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resume {
    Edit { target: EditTarget, form: EditorForm },
    Delete(DeleteTarget),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorPhase {
    #[default]
    Viewing,
    Editing {
        target: EditTarget,
        form: EditorForm,
        error: Option<String>,
    },
    Deleting {
        target: DeleteTarget,
    },
    Submitting {
        mutation: Mutation,
        resume: Resume,
    },
}

impl EditorPhase {
    pub fn name(&self) -> &'static str {
        match self {
            EditorPhase::Viewing => "viewing",
            EditorPhase::Editing { .. } => "editing",
            EditorPhase::Deleting { .. } => "deleting",
            EditorPhase::Submitting { .. } => "submitting",
        }
    }
}

/// Administration editor for one view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminEditor {
    phase: EditorPhase,
}

impl AdminEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &EditorPhase {
        &self.phase
    }

    pub fn is_viewing(&self) -> bool {
        matches!(self.phase, EditorPhase::Viewing)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, EditorPhase::Submitting { .. })
    }

    /// Target and form of the open edit dialog, including while it submits
    pub fn edit_form(&self) -> Option<(EditTarget, &EditorForm)> {
        match &self.phase {
            EditorPhase::Editing { target, form, .. } => Some((*target, form)),
            EditorPhase::Submitting {
                resume: Resume::Edit { target, form },
                ..
            } => Some((*target, form)),
            _ => None,
        }
    }

    /// Target of the open delete confirmation, including while it submits
    pub fn delete_target(&self) -> Option<&DeleteTarget> {
        match &self.phase {
            EditorPhase::Deleting { target } => Some(target),
            EditorPhase::Submitting {
                resume: Resume::Delete(target),
                ..
            } => Some(target),
            _ => None,
        }
    }

    /// Error from the last failed validation or submission
    pub fn form_error(&self) -> Option<&str> {
        match &self.phase {
            EditorPhase::Editing { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    /// Mutable form, only while editing
    pub fn form_mut(&mut self) -> Option<&mut EditorForm> {
        match &mut self.phase {
            EditorPhase::Editing { form, .. } => Some(form),
            _ => None,
        }
    }

    // ------------------------------------------------------------------------
    // Viewing → Editing / Deleting
    // ------------------------------------------------------------------------

    pub fn begin_create_tab(&mut self, tree: &TaxonomyTree) -> PortalResult<()> {
        let form = EditorForm::Tab(TabInput {
            title: String::new(),
            slug: String::new(),
            position: next_position(tree.tabs()),
            is_active: true,
        });
        self.open_form(EditTarget::NewTab, form)
    }

    pub fn begin_edit_tab(&mut self, tree: &TaxonomyTree, id: TabId) -> PortalResult<()> {
        let node = tree
            .node(id)
            .ok_or_else(|| PortalError::TabNotFound(id.to_string()))?;
        self.open_form(EditTarget::Tab(id), EditorForm::Tab(TabInput::from_tab(&node.tab)))
    }

    pub fn begin_create_section(&mut self, tree: &TaxonomyTree, tab: TabId) -> PortalResult<()> {
        let node = tree
            .node(tab)
            .ok_or_else(|| PortalError::TabNotFound(tab.to_string()))?;
        let form = EditorForm::Section(SectionInput {
            tab_id: tab,
            title: String::new(),
            slug: String::new(),
            description: None,
            position: next_position(node.sections.iter().map(|n| &n.section)),
            is_active: true,
        });
        self.open_form(EditTarget::NewSection(tab), form)
    }

    pub fn begin_edit_section(
        &mut self,
        tree: &TaxonomyTree,
        tab: TabId,
        section: SectionId,
    ) -> PortalResult<()> {
        let node = tree
            .node(tab)
            .and_then(|node| node.section(section))
            .ok_or_else(|| PortalError::SectionNotFound(section.to_string()))?;
        let form = EditorForm::Section(SectionInput::from_section(tab, &node.section));
        self.open_form(EditTarget::Section { tab, section }, form)
    }

    pub fn begin_delete_tab(&mut self, tree: &TaxonomyTree, id: TabId) -> PortalResult<()> {
        let node = tree
            .node(id)
            .ok_or_else(|| PortalError::TabNotFound(id.to_string()))?;
        self.open_delete(DeleteTarget::Tab {
            id,
            title: node.tab.title.clone(),
            section_count: node.sections.len(),
        })
    }

    pub fn begin_delete_section(
        &mut self,
        tree: &TaxonomyTree,
        tab: TabId,
        section: SectionId,
    ) -> PortalResult<()> {
        let node = tree
            .node(tab)
            .and_then(|node| node.section(section))
            .ok_or_else(|| PortalError::SectionNotFound(section.to_string()))?;
        self.open_delete(DeleteTarget::Section {
            tab,
            id: section,
            title: node.section.title.clone(),
            docs_count: node.docs_count,
        })
    }

    fn open_form(&mut self, target: EditTarget, form: EditorForm) -> PortalResult<()> {
        self.require_viewing()?;
        self.phase = EditorPhase::Editing {
            target,
            form,
            error: None,
        };
        Ok(())
    }

    fn open_delete(&mut self, target: DeleteTarget) -> PortalResult<()> {
        self.require_viewing()?;
        self.phase = EditorPhase::Deleting { target };
        Ok(())
    }

    fn require_viewing(&self) -> PortalResult<()> {
        if self.is_viewing() {
            Ok(())
        } else {
            Err(PortalError::validation(format!(
                "another change is in progress ({})",
                self.phase.name()
            )))
        }
    }

    // ------------------------------------------------------------------------
    // Editing / Deleting → Submitting
    // ------------------------------------------------------------------------

    /// Validate the open form (or take the pending delete) and move to
    /// `Submitting`. Returns the mutation to send.
    ///
    /// A form that fails validation stays in `Editing` with the error
    /// recorded.
    pub fn submit(&mut self, tree: &TaxonomyTree) -> PortalResult<Mutation> {
        match std::mem::take(&mut self.phase) {
            EditorPhase::Editing { target, form, .. } => {
                let form = form.normalized();
                match build_mutation(tree, target, &form) {
                    Ok(mutation) => {
                        self.phase = EditorPhase::Submitting {
                            mutation: mutation.clone(),
                            resume: Resume::Edit { target, form },
                        };
                        Ok(mutation)
                    }
                    Err(e) => {
                        self.phase = EditorPhase::Editing {
                            target,
                            form,
                            error: Some(e.to_string()),
                        };
                        Err(e)
                    }
                }
            }
            EditorPhase::Deleting { target } => {
                let mutation = target.mutation();
                self.phase = EditorPhase::Submitting {
                    mutation: mutation.clone(),
                    resume: Resume::Delete(target),
                };
                Ok(mutation)
            }
            other => {
                let name = other.name();
                self.phase = other;
                Err(PortalError::validation(format!(
                    "nothing to submit while {name}"
                )))
            }
        }
    }

    // ------------------------------------------------------------------------
    // Submitting → Viewing / Editing
    // ------------------------------------------------------------------------

    /// Record the server's answer.
    ///
    /// Success returns to `Viewing`. A failed edit reopens the form with the
    /// message; a failed delete returns to `Viewing`.
    pub fn finish(&mut self, outcome: Result<(), String>) -> PortalResult<()> {
        let EditorPhase::Submitting { resume, .. } = std::mem::take(&mut self.phase) else {
            return Err(PortalError::validation("no submission in flight"));
        };
        self.phase = match (outcome, resume) {
            (Ok(()), _) => EditorPhase::Viewing,
            (Err(message), Resume::Edit { target, form }) => EditorPhase::Editing {
                target,
                form,
                error: Some(message),
            },
            (Err(_), Resume::Delete(_)) => EditorPhase::Viewing,
        };
        Ok(())
    }

    /// Close an open form or confirmation. In-flight submissions are not
    /// interrupted; returns whether anything was closed.
    pub fn cancel(&mut self) -> bool {
        match self.phase {
            EditorPhase::Editing { .. } | EditorPhase::Deleting { .. } => {
                self.phase = EditorPhase::Viewing;
                true
            }
            _ => false,
        }
    }
}

fn build_mutation(
    tree: &TaxonomyTree,
    target: EditTarget,
    form: &EditorForm,
) -> PortalResult<Mutation> {
    form.validate()?;
    match (target, form) {
        (EditTarget::NewTab, EditorForm::Tab(input)) => {
            ensure_tab_slug_available(tree, &input.slug, None)?;
            Ok(Mutation::CreateTab(input.clone()))
        }
        (EditTarget::Tab(id), EditorForm::Tab(input)) => {
            ensure_tab_slug_available(tree, &input.slug, Some(id))?;
            Ok(Mutation::UpdateTab(id, input.clone()))
        }
        (EditTarget::NewSection(tab), EditorForm::Section(input)) => {
            ensure_section_slug_available(tree, tab, &input.slug, None)?;
            Ok(Mutation::CreateSection(input.clone()))
        }
        (EditTarget::Section { tab, section }, EditorForm::Section(input)) => {
            ensure_section_slug_available(tree, tab, &input.slug, Some(section))?;
            Ok(Mutation::UpdateSection(section, input.clone()))
        }
        _ => Err(PortalError::validation("form does not match its target")),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use edutalks_core::Slug;
    use edutalks_taxonomy::{Section, Tab, TabNode};

    fn slug(s: &str) -> Slug {
        Slug::new(s).unwrap()
    }

    fn tree() -> TaxonomyTree {
        TaxonomyTree::new(vec![
            TabNode::new(Tab::new(1, "Legal", slug("legal")).with_position(1))
                .with_section(Section::new(10, "Forms", slug("forms")).with_position(1), 4)
                .with_section(Section::new(11, "Drafts", slug("drafts")).with_position(5), 0),
            TabNode::new(Tab::new(2, "Archive", slug("archive")).with_position(7).with_active(false)),
        ])
    }

    #[test]
    fn test_create_tab_uses_next_position() {
        let mut editor = AdminEditor::new();
        editor.begin_create_tab(&tree()).unwrap();
        let (target, form) = editor.edit_form().unwrap();
        assert_eq!(target, EditTarget::NewTab);
        assert_eq!(form.position(), 8);
        assert!(form.is_active());
    }

    #[test]
    fn test_create_tab_on_empty_tree_starts_at_one() {
        let mut editor = AdminEditor::new();
        editor.begin_create_tab(&TaxonomyTree::empty()).unwrap();
        assert_eq!(editor.edit_form().unwrap().1.position(), 1);
    }

    #[test]
    fn test_create_section_position_is_per_tab() {
        let mut editor = AdminEditor::new();
        editor.begin_create_section(&tree(), TabId(1)).unwrap();
        assert_eq!(editor.edit_form().unwrap().1.position(), 6);

        let mut editor = AdminEditor::new();
        editor.begin_create_section(&tree(), TabId(2)).unwrap();
        assert_eq!(editor.edit_form().unwrap().1.position(), 1);
    }

    #[test]
    fn test_edit_form_is_prefilled() {
        let mut editor = AdminEditor::new();
        editor
            .begin_edit_section(&tree(), TabId(1), SectionId(10))
            .unwrap();
        let (target, form) = editor.edit_form().unwrap();
        assert_eq!(
            target,
            EditTarget::Section {
                tab: TabId(1),
                section: SectionId(10)
            }
        );
        assert_eq!(form.title(), "Forms");
        assert_eq!(form.slug(), "forms");
    }

    #[test]
    fn test_edit_success_returns_to_viewing() {
        let tree = tree();
        let mut editor = AdminEditor::new();
        editor.begin_edit_tab(&tree, TabId(1)).unwrap();
        editor.form_mut().unwrap().set_title("  Legal documents ".to_string());

        let mutation = editor.submit(&tree).unwrap();
        match &mutation {
            Mutation::UpdateTab(id, input) => {
                assert_eq!(*id, TabId(1));
                assert_eq!(input.title, "Legal documents");
            }
            other => panic!("unexpected mutation {other:?}"),
        }
        assert!(editor.is_submitting());
        assert!(editor.form_mut().is_none());

        editor.finish(Ok(())).unwrap();
        assert!(editor.is_viewing());
    }

    #[test]
    fn test_edit_failure_keeps_form_for_resubmission() {
        let tree = tree();
        let mut editor = AdminEditor::new();
        editor.begin_create_tab(&tree).unwrap();
        {
            let form = editor.form_mut().unwrap();
            form.set_title("News".to_string());
            form.set_slug("news".to_string());
        }
        editor.submit(&tree).unwrap();
        editor.finish(Err("Something went wrong".to_string())).unwrap();

        assert_eq!(editor.phase().name(), "editing");
        assert_eq!(editor.form_error(), Some("Something went wrong"));
        assert_eq!(editor.edit_form().unwrap().1.slug(), "news");
        assert!(matches!(editor.submit(&tree), Ok(Mutation::CreateTab(_))));
    }

    #[test]
    fn test_invalid_form_stays_in_editing() {
        let tree = tree();
        let mut editor = AdminEditor::new();
        editor.begin_create_tab(&tree).unwrap();
        editor.form_mut().unwrap().set_title("Legal copy".to_string());
        editor.form_mut().unwrap().set_slug("Legal Copy".to_string());

        assert!(editor.submit(&tree).is_err());
        assert_eq!(editor.phase().name(), "editing");
        assert!(editor.form_error().is_some());
    }

    #[test]
    fn test_duplicate_slug_is_rejected_except_for_self() {
        let tree = tree();

        let mut editor = AdminEditor::new();
        editor.begin_create_tab(&tree).unwrap();
        editor.form_mut().unwrap().set_title("Legal 2".to_string());
        editor.form_mut().unwrap().set_slug("legal".to_string());
        assert!(editor.submit(&tree).is_err());

        let mut editor = AdminEditor::new();
        editor.begin_edit_tab(&tree, TabId(1)).unwrap();
        assert!(editor.submit(&tree).is_ok());
    }

    #[test]
    fn test_delete_failure_returns_to_viewing() {
        let tree = tree();
        let mut editor = AdminEditor::new();
        editor
            .begin_delete_section(&tree, TabId(1), SectionId(10))
            .unwrap();
        let target = editor.delete_target().unwrap().clone();
        assert_eq!(target.title(), "Forms");
        assert_eq!(target.kind(), "section");

        assert_eq!(
            editor.submit(&tree).unwrap(),
            Mutation::DeleteSection(SectionId(10))
        );
        assert!(editor.delete_target().is_some());

        editor.finish(Err("Forbidden".to_string())).unwrap();
        assert!(editor.is_viewing());
    }

    #[test]
    fn test_only_one_change_at_a_time() {
        let tree = tree();
        let mut editor = AdminEditor::new();
        editor.begin_delete_tab(&tree, TabId(2)).unwrap();
        assert!(editor.begin_edit_tab(&tree, TabId(1)).is_err());

        editor.submit(&tree).unwrap();
        assert!(!editor.cancel());
        assert!(editor.is_submitting());
    }

    #[test]
    fn test_cancel_and_invalid_transitions() {
        let tree = tree();
        let mut editor = AdminEditor::new();
        assert!(editor.submit(&tree).is_err());
        assert!(editor.finish(Ok(())).is_err());
        assert!(editor.is_viewing());

        editor.begin_edit_tab(&tree, TabId(2)).unwrap();
        assert!(editor.cancel());
        assert!(editor.is_viewing());

        assert!(editor.begin_edit_tab(&tree, TabId(42)).unwrap_err().is_not_found());
    }

    #[test]
    fn test_section_description_is_normalized() {
        let tree = tree();
        let mut editor = AdminEditor::new();
        editor.begin_create_section(&tree, TabId(1)).unwrap();
        {
            let form = editor.form_mut().unwrap();
            form.set_title("Past papers".to_string());
            form.set_slug("past-papers".to_string());
            form.set_description("   ".to_string());
        }
        match editor.submit(&tree).unwrap() {
            Mutation::CreateSection(input) => {
                assert_eq!(input.tab_id, TabId(1));
                assert_eq!(input.description, None);
                assert_eq!(input.position, 6);
            }
            other => panic!("unexpected mutation {other:?}"),
        }
    }
}
