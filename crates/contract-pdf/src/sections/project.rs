use contract_model::{
    model::Project,
    plan::{project_rows, DocumentKind, Field, ProjectExtra},
};
use pdf_base::{content::Rgb, font::StandardFont};

use crate::layout::{LayoutContext, BODY_SIZE};

const DESCRIPTION_LINES: usize = 3;

/// The project name, its description and the kind-specific details
pub fn render_project(
    ctx: &mut LayoutContext,
    kind: DocumentKind,
    project: &Project,
    extra: ProjectExtra,
) {
    let (left, width) = (ctx.left(), ctx.content_width());
    let bold = StandardFont::HelveticaBold;
    ctx.paragraph(bold, 10.5, Rgb::BLACK, left, width, &project.name, Some(2));
    for (field, value) in project_rows(kind, project, extra) {
        if field == Field::ProjectDescription {
            ctx.record(field);
            let regular = StandardFont::Helvetica;
            let max = Some(DESCRIPTION_LINES);
            ctx.paragraph(regular, BODY_SIZE, Rgb::BLACK, left, width, &value, max);
            ctx.gap(4.0);
        } else {
            ctx.label_value(field, &value);
        }
    }
}
