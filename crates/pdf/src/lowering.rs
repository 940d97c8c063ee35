//! Helpers to turn *high* types into *low* types

use std::{collections::BTreeMap, io};

use crate::{
    common::{ObjRef, PdfString},
    encoding::pdf_doc_encode_lossy,
    high::{Destination, OutlineItem},
    low,
    util::NextId,
};

/// Make a ObjRef for an original document (generation 0)
pub fn make_ref(id: u64) -> ObjRef {
    ObjRef { id, gen: 0 }
}

fn lower_dest(pages: &[ObjRef], dest: Destination) -> io::Result<low::Action> {
    use low::Action::*;
    use low::Destination::*;
    match dest {
        Destination::PageFitH(a, top) => {
            let page = pages.get(a).copied().ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Outline points to page #{} of {}", a, pages.len()),
                )
            })?;
            Ok(GoTo(PageFitH(page, top)))
        }
    }
}

fn lower_children(
    acc: &mut Vec<(ObjRef, low::OutlineItem)>,
    pages: &[ObjRef],
    item: &OutlineItem,
    id: ObjRef,
    id_gen: &mut NextId,
) -> io::Result<(Option<ObjRef>, Option<ObjRef>)> {
    Ok(
        match lower_outline_items(acc, pages, &item.children, id, id_gen)? {
            Some((fc, lc)) => (Some(fc), Some(lc)),
            None => (None, None),
        },
    )
}

/// Lower a list of sibling outline items, returns the first and last reference
pub(crate) fn lower_outline_items(
    acc: &mut Vec<(ObjRef, low::OutlineItem)>,
    pages: &[ObjRef],
    items: &[OutlineItem],
    parent: ObjRef,
    id_gen: &mut NextId,
) -> io::Result<Option<(ObjRef, ObjRef)>> {
    let (last, rest) = match items.split_last() {
        Some(split) => split,
        None => return Ok(None),
    };

    let mut prev = None;
    let first_ref = make_ref(id_gen.next());
    let mut curr = first_ref;

    // most items
    for item in rest {
        let (fc, lc) = lower_children(acc, pages, item, curr, id_gen)?;
        let action = lower_dest(pages, item.dest)?;
        let next = make_ref(id_gen.next());
        acc.push((
            curr,
            low::OutlineItem {
                title: PdfString::new(&pdf_doc_encode_lossy(&item.title)),
                parent,
                prev,
                next: Some(next),
                first: fc,
                last: lc,
                count: 0,
                action,
            },
        ));
        prev = Some(curr);
        curr = next;
    }

    // Last item
    let (fc, lc) = lower_children(acc, pages, last, curr, id_gen)?;
    let action = lower_dest(pages, last.dest)?;
    acc.push((
        curr,
        low::OutlineItem {
            title: PdfString::new(&pdf_doc_encode_lossy(&last.title)),
            parent,
            prev,
            next: None,
            first: fc,
            last: lc,
            count: 0,
            action,
        },
    ));
    Ok(Some((first_ref, curr)))
}

/// Assigns object IDs to global resources the first time they are used
pub(crate) struct LowerBox<'a, T> {
    store: BTreeMap<usize, (ObjRef, &'a T)>,
    res: &'a [T],
}

impl<'a, T> LowerBox<'a, T> {
    pub(crate) fn new(res: &'a [T]) -> Self {
        LowerBox {
            store: BTreeMap::new(),
            res,
        }
    }

    /// All resources that were referenced, ordered by their index
    pub(crate) fn store_values(&self) -> impl Iterator<Item = (ObjRef, &'a T)> + '_ {
        self.store.values().copied()
    }

    /// Lower the global resource at `index` into an object ref
    pub(crate) fn map_ref(&mut self, index: usize, id_gen: &mut NextId) -> io::Result<ObjRef> {
        if let Some((r, _)) = self.store.get(&index) {
            Ok(*r)
        } else if let Some(val) = self.res.get(index) {
            let r = make_ref(id_gen.next());
            self.store.insert(index, (r, val));
            Ok(r)
        } else {
            Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Couldn't find resource #{}", index),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{lower_outline_items, make_ref, LowerBox};
    use crate::{
        high::{Destination, OutlineItem},
        util::NextId,
    };

    #[test]
    fn siblings_are_linked() {
        let pages = [make_ref(10), make_ref(11)];
        let leaf = |title: &str, page| OutlineItem {
            title: title.to_owned(),
            dest: Destination::PageFitH(page, 800.0),
            children: vec![],
        };
        let items = vec![leaf("A", 0), leaf("B", 1), leaf("C", 1)];
        let mut acc = Vec::new();
        let mut id_gen = NextId::new(20);
        let (first, last) = lower_outline_items(&mut acc, &pages, &items, make_ref(1), &mut id_gen)
            .unwrap()
            .unwrap();
        assert_eq!(acc.len(), 3);
        assert_eq!(first, acc[0].0);
        assert_eq!(last, acc[2].0);
        assert_eq!(acc[0].1.next, Some(acc[1].0));
        assert_eq!(acc[1].1.prev, Some(acc[0].0));
        assert_eq!(acc[2].1.next, None);
    }

    #[test]
    fn resources_are_lowered_once() {
        let res = ["a", "b"];
        let mut lower = LowerBox::new(&res);
        let mut id_gen = NextId::new(5);
        let b = lower.map_ref(1, &mut id_gen).unwrap();
        assert_eq!(lower.map_ref(1, &mut id_gen).unwrap(), b);
        assert!(lower.map_ref(2, &mut id_gen).is_err());
        assert_eq!(lower.store_values().count(), 1);
    }
}
