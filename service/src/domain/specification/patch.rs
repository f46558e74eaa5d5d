//! [`Patch`] of a [`JobSpecification`].

use serde::{Deserialize, Serialize};

use crate::domain::job;

use super::{
    bill_book::{self, BindingKind},
    die_cut, Color, CustomColor, CustomerRef, DieCut, JobSpecification,
    Laminating, Material, MaterialSupply, PaperItem, PaperSupply,
    PrintingMethod, Supplier,
};

/// Typed update of a single part of a [`JobSpecification`].
///
/// Patches addressing a missing subsection create it with defaults first.
/// Patches addressing a missing list index are ignored.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(content = "value", rename_all = "camelCase", tag = "op")]
pub enum Patch {
    /// Sets [`JobSpecification::customer`].
    SetCustomer(Option<CustomerRef>),

    /// Sets [`JobSpecification::job_number`].
    SetJobNumber(Option<job::Number>),

    /// Sets [`JobSpecification::job_name`].
    SetJobName(Option<job::Name>),

    /// Sets [`JobSpecification::quantity`].
    SetQuantity(Option<job::Quantity>),

    /// Sets [`JobSpecification::delivery_date`].
    SetDeliveryDate(Option<job::DeliveryDateTime>),

    /// Sets [`JobSpecification::paper_supply`].
    SetPaperSupply(Option<PaperSupply>),

    /// Selects or deselects a palette [`Color`].
    ToggleColor(Color),

    /// Selects a [`CustomColor`], or deselects it with [`None`].
    SetCustomColor(Option<CustomColor>),

    /// Appends a [`PaperItem`].
    AddPaperItem(PaperItem),

    /// Replaces the [`PaperItem`] at the provided index.
    UpdatePaperItem(usize, PaperItem),

    /// Removes the [`PaperItem`] at the provided index.
    RemovePaperItem(usize),

    /// Sets [`JobSpecification::printing_method`].
    SetPrintingMethod(Option<PrintingMethod>),

    /// Sets [`JobSpecification::laminating`].
    SetLaminating(Option<Laminating>),

    /// Sets [`JobSpecification::die_cut`].
    SetDieCut(Option<DieCut>),

    /// Selects or deselects a [`die_cut::Operation`].
    ToggleDieCutOperation(die_cut::Operation),

    /// Sets [`JobSpecification::bill_book`].
    SetBillBook(Option<bill_book::BillBook>),

    /// Resizes the papers of the bill book.
    SetNumberOfPapers(u32),

    /// Replaces the bill book [`bill_book::Paper`] at the provided index.
    SetBillBookPaper(usize, bill_book::Paper),

    /// Sets the [`bill_book::Details`].
    SetBillBookDetails(bill_book::Details),

    /// Sets the bill book gathering.
    SetGathering(bool),

    /// Sets the [`BindingKind`] of the bill book.
    SetBinding(Option<BindingKind>),

    /// Sets the [`Supplier`] of a [`Material`].
    SetSupplier(Material, Supplier),

    /// Sets [`JobSpecification::material_supply`].
    SetMaterialSupply(Option<MaterialSupply>),
}

impl Patch {
    /// Applies this [`Patch`] to the provided [`JobSpecification`].
    pub(super) fn apply(self, spec: JobSpecification) -> JobSpecification {
        match self {
            Self::SetCustomer(customer) => {
                JobSpecification { customer, ..spec }
            }
            Self::SetJobNumber(job_number) => {
                JobSpecification { job_number, ..spec }
            }
            Self::SetJobName(job_name) => JobSpecification { job_name, ..spec },
            Self::SetQuantity(quantity) => JobSpecification { quantity, ..spec },
            Self::SetDeliveryDate(delivery_date) => JobSpecification {
                delivery_date,
                ..spec
            },
            Self::SetPaperSupply(paper_supply) => JobSpecification {
                paper_supply,
                ..spec
            },
            Self::ToggleColor(color) => JobSpecification {
                colors: Some(spec.colors.unwrap_or_default().toggle(color)),
                ..spec
            },
            Self::SetCustomColor(custom) => {
                let mut colors = spec.colors.unwrap_or_default();
                colors.custom = custom;
                JobSpecification {
                    colors: Some(colors),
                    ..spec
                }
            }
            Self::AddPaperItem(item) => {
                let mut paper_items = spec.paper_items;
                paper_items.push(item);
                JobSpecification {
                    paper_items,
                    ..spec
                }
            }
            Self::UpdatePaperItem(i, item) => {
                let mut paper_items = spec.paper_items;
                if let Some(slot) = paper_items.get_mut(i) {
                    *slot = item;
                }
                JobSpecification {
                    paper_items,
                    ..spec
                }
            }
            Self::RemovePaperItem(i) => {
                let mut paper_items = spec.paper_items;
                if i < paper_items.len() {
                    drop(paper_items.remove(i));
                }
                JobSpecification {
                    paper_items,
                    ..spec
                }
            }
            Self::SetPrintingMethod(printing_method) => JobSpecification {
                printing_method,
                ..spec
            },
            Self::SetLaminating(laminating) => {
                JobSpecification { laminating, ..spec }
            }
            Self::SetDieCut(die_cut) => JobSpecification { die_cut, ..spec },
            Self::ToggleDieCutOperation(op) => JobSpecification {
                die_cut: Some(spec.die_cut.unwrap_or_default().toggle(op)),
                ..spec
            },
            Self::SetBillBook(bill_book) => {
                JobSpecification { bill_book, ..spec }
            }
            Self::SetNumberOfPapers(count) => JobSpecification {
                bill_book: Some(
                    spec.bill_book
                        .unwrap_or_default()
                        .with_number_of_papers(count),
                ),
                ..spec
            },
            Self::SetBillBookPaper(i, paper) => {
                let mut book = spec.bill_book.unwrap_or_default();
                if let Some(slot) = book.papers.get_mut(i) {
                    *slot = paper;
                }
                JobSpecification {
                    bill_book: Some(book),
                    ..spec
                }
            }
            Self::SetBillBookDetails(details) => JobSpecification {
                bill_book: Some(bill_book::BillBook {
                    details,
                    ..spec.bill_book.unwrap_or_default()
                }),
                ..spec
            },
            Self::SetGathering(gathering) => JobSpecification {
                bill_book: Some(bill_book::BillBook {
                    gathering,
                    ..spec.bill_book.unwrap_or_default()
                }),
                ..spec
            },
            Self::SetBinding(binding) => JobSpecification {
                bill_book: Some(bill_book::BillBook {
                    binding,
                    ..spec.bill_book.unwrap_or_default()
                }),
                ..spec
            },
            Self::SetSupplier(material, supplier) => JobSpecification {
                material_supply: Some(
                    spec.material_supply
                        .unwrap_or_default()
                        .with(material, supplier),
                ),
                ..spec
            },
            Self::SetMaterialSupply(material_supply) => JobSpecification {
                material_supply,
                ..spec
            },
        }
    }
}

#[cfg(test)]
mod spec {
    use crate::domain::{
        job,
        specification::{
            bill_book::{self, BindingKind},
            Color, JobSpecification, Material, PaperItem, PaperType, Patch,
            Supplier,
        },
    };

    #[test]
    fn sets_top_level_fields_immutably() {
        let draft = JobSpecification::default();

        let updated = draft
            .clone()
            .with(Patch::SetJobName(job::Name::new("Letterheads")));

        assert_eq!(draft.job_name, None);
        assert_eq!(updated.job_name, job::Name::new("Letterheads"));
    }

    #[test]
    fn toggles_colors_creating_subsection() {
        let spec = JobSpecification::default()
            .with(Patch::ToggleColor(Color::Magenta))
            .with(Patch::ToggleColor(Color::Yellow))
            .with(Patch::ToggleColor(Color::Magenta));

        let colors = spec.colors.unwrap();
        assert_eq!(colors.palette.into_iter().collect::<Vec<_>>(), [
            Color::Yellow
        ]);
        assert_eq!(colors.custom, None);
    }

    #[test]
    fn edits_paper_items_by_index() {
        let item = |name: &str| PaperItem {
            paper_type: PaperType::new(name),
            ..PaperItem::default()
        };

        let spec = JobSpecification::default()
            .with(Patch::AddPaperItem(item("Art paper")))
            .with(Patch::AddPaperItem(item("Bond")))
            .with(Patch::UpdatePaperItem(1, item("Kraft")))
            .with(Patch::UpdatePaperItem(9, item("Ignored")))
            .with(Patch::RemovePaperItem(0))
            .with(Patch::RemovePaperItem(5));

        assert_eq!(spec.paper_items, [item("Kraft")]);
    }

    #[test]
    fn number_of_papers_always_matches_papers() {
        let paper = bill_book::Paper {
            paper_type: PaperType::new("Pink"),
            ..bill_book::Paper::default()
        };

        for n in [0, 1, 3, 7, 2] {
            let spec = JobSpecification::default()
                .with(Patch::SetNumberOfPapers(3))
                .with(Patch::SetBillBookPaper(0, paper.clone()))
                .with(Patch::SetNumberOfPapers(n));

            let book = spec.bill_book.unwrap();
            assert_eq!(book.papers.len(), usize::try_from(n).unwrap());
            assert!(book.is_consistent());
            if n > 0 {
                assert_eq!(book.papers[0], paper);
            }
            assert!(book.papers.iter().skip(1).all(|p| p.paper_type.is_none()));
        }
    }

    #[test]
    fn binding_keeps_other_bill_book_fields() {
        let spec = JobSpecification::default()
            .with(Patch::SetNumberOfPapers(2))
            .with(Patch::SetGathering(true))
            .with(Patch::SetBinding(Some(BindingKind::Spiral)));

        let book = spec.bill_book.unwrap();
        assert_eq!(book.number_of_papers, 2);
        assert!(book.gathering);
        assert_eq!(book.binding, Some(BindingKind::Spiral));
    }

    #[test]
    fn sets_suppliers() {
        let spec = JobSpecification::default()
            .with(Patch::SetSupplier(Material::Plate, Supplier::Shop(None)));

        assert_eq!(
            spec.material_supply.unwrap().0.get(&Material::Plate),
            Some(&Supplier::Shop(None)),
        );
    }

    #[test]
    fn deserializes_from_tagged_json() {
        let patch: Patch = serde_json::from_str(
            r#"{"op": "setNumberOfPapers", "value": 3}"#,
        )
        .unwrap();
        assert_eq!(patch, Patch::SetNumberOfPapers(3));

        let patch: Patch =
            serde_json::from_str(r#"{"op": "toggleColor", "value": "silver"}"#)
                .unwrap();
        assert_eq!(patch, Patch::ToggleColor(Color::Silver));
    }
}
