//! [`Decomposition`] of a [`Normalized`] job specification into rows.

use crate::domain::{
    customer,
    job::{self, row},
    job_type,
};

use super::{bill_book, Color, Material, Normalized, PaperType, Supplier};

/// Child rows of a [`Job`], grouped by their [`row::Subsection`].
///
/// Rows depending on IDs generated while inserting their parents are built
/// lazily out of those IDs.
///
/// [`Job`]: crate::domain::Job
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Decomposition {
    /// Rows of [`row::Subsection::Colors`].
    pub colors: Vec<row::Color>,

    /// Rows of [`row::Subsection::PaperItems`].
    pub paper_items: Vec<row::PaperItem>,

    /// Row of [`row::Subsection::PrintingMethod`].
    pub printing_method: row::PrintingMethod,

    /// Row of [`row::Subsection::Laminating`].
    pub laminating: row::Laminating,

    /// Row of [`row::Subsection::DieCut`].
    pub die_cut: row::DieCut,

    /// Rows of [`row::Subsection::BillBook`].
    pub bill_book: BillBookRows,

    /// Rows of [`row::Subsection::MaterialSupply`].
    pub material_supply: MaterialSupplyRows,
}

/// [`row::BillBook`] with its nested papers.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BillBookRows {
    /// [`row::BillBook`] itself.
    pub book: row::BillBook,

    /// Papers of the bill book.
    pub papers: Vec<PaperRows>,
}

/// Not yet inserted [`row::BillBookPaper`] with its colors.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaperRows {
    /// Position of the paper within a bill.
    position: i32,

    /// [`PaperType`] of the paper.
    paper_type: Option<PaperType>,

    /// [`Color`]s printed on the paper.
    colors: Vec<Color>,
}

impl PaperRows {
    /// Builds the [`row::BillBookPaper`] of the inserted bill book.
    #[must_use]
    pub fn paper(&self, bill_book_id: row::BillBookId) -> row::BillBookPaper {
        row::BillBookPaper {
            bill_book_id,
            position: self.position,
            paper_type: self.paper_type.clone(),
        }
    }

    /// Builds the [`row::BillBookPaperColor`]s of the inserted paper.
    pub fn colors(
        &self,
        paper_id: row::BillBookPaperId,
    ) -> impl Iterator<Item = row::BillBookPaperColor> + '_ {
        self.colors
            .iter()
            .map(move |&color| row::BillBookPaperColor { paper_id, color })
    }
}

/// [`row::MaterialSupply`] with its not yet inserted items.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MaterialSupplyRows {
    /// [`row::MaterialSupply`] itself.
    pub supply: row::MaterialSupply,

    /// [`Supplier`]s of every [`Material`].
    items: Vec<(Material, Supplier)>,
}

impl MaterialSupplyRows {
    /// Builds the [`row::MaterialSupplyItem`]s of the inserted supply.
    pub fn items(
        &self,
        material_supply_id: row::MaterialSupplyId,
    ) -> impl Iterator<Item = row::MaterialSupplyItem> + '_ {
        self.items.iter().map(move |(material, supplier)| {
            let (supplied_by_shop, supplier_name) = match supplier {
                Supplier::Customer => (false, None),
                Supplier::Shop(name) => (true, name.clone()),
            };
            row::MaterialSupplyItem {
                material_supply_id,
                material: *material,
                supplied_by_shop,
                supplier_name,
            }
        })
    }
}

impl Normalized {
    /// Builds the parent [`row::NewJob`] of this [`Normalized`] job
    /// specification.
    #[must_use]
    pub fn parent(
        &self,
        job_type_id: job_type::Id,
        customer_id: customer::Id,
        created_at: job::CreationDateTime,
    ) -> row::NewJob {
        row::NewJob {
            job_type_id,
            customer_id,
            number: self.job_number.clone(),
            name: self.job_name.clone(),
            quantity: self.quantity,
            delivery_date: self.delivery_date,
            status: job::Status::default(),
            paper_supply: self.paper_supply.clone(),
            created_at,
        }
    }

    /// Decomposes this [`Normalized`] job specification into the child rows
    /// of the inserted parent [`Job`].
    ///
    /// Every single-row subsection produces exactly one row, even if it was
    /// skipped. Colors produce one row per selected palette [`Color`],
    /// followed by the custom color row, if any.
    ///
    /// [`Job`]: crate::domain::Job
    #[must_use]
    pub fn decompose(&self, job_id: job::Id) -> Decomposition {
        let colors = self
            .colors
            .palette
            .iter()
            .map(|&c| row::ColorValue::Palette(c))
            .chain(self.colors.custom.clone().map(row::ColorValue::Custom))
            .map(|value| row::Color { job_id, value })
            .collect();

        let paper_items = self
            .paper_items
            .iter()
            .zip(0..)
            .map(|(item, position)| row::PaperItem {
                job_id,
                position,
                paper_type: item.paper_type.clone(),
                quantity: i64::from(item.quantity),
                cut_size: item.cut_size.clone(),
                cut_per_sheet: i64::from(item.cut_per_sheet),
            })
            .collect();

        let printing = &self.printing_method;
        let printing_method = row::PrintingMethod {
            job_id,
            paper_size: printing.paper_size.clone(),
            quantity: i64::from(printing.quantity),
            printing_system: printing.printing_system.clone(),
            impression_first: printing.impression.first,
            impression_second: printing.impression.second,
            impression_result: printing.impression.result(),
        };

        let lam = &self.laminating;
        let laminating = row::Laminating {
            job_id,
            kind: lam.kind,
            height: lam.height,
            width: lam.width,
            quantity: i64::from(lam.quantity),
            unit_price: lam.unit_price,
            result: lam.result(),
        };

        let die_cut = row::DieCut {
            job_id,
            operations: self.die_cut.operations.iter().copied().collect(),
            impression_first: self.die_cut.impression.first,
            impression_second: self.die_cut.impression.second,
            impression_result: self.die_cut.result(),
            manual_result: self.die_cut.manual_result.is_some(),
        };

        Decomposition {
            colors,
            paper_items,
            printing_method,
            laminating,
            die_cut,
            bill_book: bill_book_rows(job_id, &self.bill_book),
            material_supply: MaterialSupplyRows {
                supply: row::MaterialSupply { job_id },
                items: self
                    .material_supply
                    .0
                    .iter()
                    .map(|(m, s)| (*m, s.clone()))
                    .collect(),
            },
        }
    }
}

/// Decomposes the provided [`bill_book::BillBook`] into [`BillBookRows`].
fn bill_book_rows(
    job_id: job::Id,
    book: &bill_book::BillBook,
) -> BillBookRows {
    let bill_book::Details {
        bill_numbers,
        book_numbers,
        set_count,
        quantity,
        unit_price,
    } = &book.details;

    BillBookRows {
        book: row::BillBook {
            job_id,
            number_of_papers: i64::from(book.number_of_papers),
            bill_numbers: bill_numbers.clone(),
            book_numbers: book_numbers.clone(),
            set_count: i64::from(*set_count),
            quantity: i64::from(*quantity),
            unit_price: *unit_price,
            result: book.details.result(),
            gathering: book.gathering,
            binding: book.binding,
        },
        papers: book
            .papers
            .iter()
            .zip(0..)
            .map(|(paper, position)| PaperRows {
                position,
                paper_type: paper.paper_type.clone(),
                colors: paper.colors.iter().copied().collect(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod spec {
    use std::collections::BTreeSet;

    use rust_decimal::Decimal;

    use crate::domain::{
        job::{self, row},
        specification::{
            bill_book::{self, BindingKind},
            laminating,
            material::SupplierName,
            spec::complete,
            Color, Colors, CustomColor, JobSpecification, Material,
            MaterialSupply, PaperType, Supplier,
        },
    };

    fn job_id() -> job::Id {
        job::Id::from(42)
    }

    #[test]
    fn skipped_subsections_produce_default_rows() {
        let rows = complete().normalize().unwrap().decompose(job_id());

        assert!(rows.colors.is_empty());
        assert!(rows.paper_items.is_empty());
        assert_eq!(rows.printing_method.quantity, 0);
        assert_eq!(rows.printing_method.impression_result, Decimal::ZERO);
        assert_eq!(rows.laminating, row::Laminating {
            job_id: job_id(),
            kind: laminating::Kind::None,
            height: Decimal::ZERO,
            width: Decimal::ZERO,
            quantity: 0,
            unit_price: Decimal::ZERO,
            result: Decimal::ZERO,
        });
        assert!(rows.die_cut.operations.is_empty());
        assert!(!rows.die_cut.manual_result);
        assert_eq!(rows.bill_book.book.job_id, job_id());
        assert!(rows.bill_book.papers.is_empty());
        assert_eq!(rows.material_supply.supply.job_id, job_id());

        let items = rows.material_supply.items(5).collect::<Vec<_>>();
        assert_eq!(items.len(), 7);
        assert!(items.iter().all(|i| i.material_supply_id == 5
            && !i.supplied_by_shop
            && i.supplier_name.is_none()));
    }

    #[test]
    fn colors_follow_palette_then_custom() {
        let spec = JobSpecification {
            colors: Some(Colors {
                palette: BTreeSet::from([Color::Golden, Color::Black]),
                custom: CustomColor::new("Pantone 186 C"),
            }),
            ..complete()
        };

        let rows = spec.normalize().unwrap().decompose(job_id());

        assert_eq!(
            rows.colors.into_iter().map(|r| r.value).collect::<Vec<_>>(),
            [
                row::ColorValue::Palette(Color::Black),
                row::ColorValue::Palette(Color::Golden),
                row::ColorValue::Custom(
                    CustomColor::new("Pantone 186 C").unwrap()
                ),
            ],
        );
    }

    #[test]
    fn unselected_custom_color_emits_nothing() {
        let spec = JobSpecification {
            colors: Some(Colors {
                palette: BTreeSet::from([Color::Cyan]),
                custom: None,
            }),
            ..complete()
        };

        let rows = spec.normalize().unwrap().decompose(job_id());

        assert_eq!(rows.colors, [row::Color {
            job_id: job_id(),
            value: row::ColorValue::Palette(Color::Cyan),
        }]);
    }

    #[test]
    fn bill_book_fans_out_into_papers_and_colors() {
        let mut book = bill_book::BillBook {
            details: bill_book::Details {
                quantity: 20,
                unit_price: Decimal::new(4550, 2),
                ..bill_book::Details::default()
            },
            binding: Some(BindingKind::TopGlue),
            ..bill_book::BillBook::default()
        }
        .with_number_of_papers(2);
        book.papers[0] = bill_book::Paper {
            paper_type: PaperType::new("White maplitho"),
            colors: BTreeSet::from([Color::Black, Color::Red]),
        };
        let spec = JobSpecification {
            bill_book: Some(book),
            ..complete()
        };

        let rows = spec.normalize().unwrap().decompose(job_id()).bill_book;

        assert_eq!(rows.book.number_of_papers, 2);
        assert_eq!(rows.book.result, Decimal::from(910));
        assert_eq!(rows.book.binding, Some(BindingKind::TopGlue));
        assert_eq!(rows.papers.len(), 2);

        let first = rows.papers[0].paper(3);
        assert_eq!(first.bill_book_id, 3);
        assert_eq!(first.position, 0);
        assert_eq!(first.paper_type, PaperType::new("White maplitho"));
        assert_eq!(
            rows.papers[0]
                .colors(11)
                .map(|c| (c.paper_id, c.color))
                .collect::<Vec<_>>(),
            [(11, Color::Black), (11, Color::Red)],
        );

        assert_eq!(rows.papers[1].paper(3).position, 1);
        assert_eq!(rows.papers[1].colors(12).count(), 0);
    }

    #[test]
    fn shop_supplier_keeps_its_name() {
        let spec = JobSpecification {
            material_supply: Some(MaterialSupply::default().with(
                Material::Binding,
                Supplier::Shop(SupplierName::new("Binders Ltd")),
            )),
            ..complete()
        };

        let rows = spec.normalize().unwrap().decompose(job_id());
        let binding = rows
            .material_supply
            .items(1)
            .find(|i| i.material == Material::Binding)
            .unwrap();

        assert!(binding.supplied_by_shop);
        assert_eq!(binding.supplier_name, SupplierName::new("Binders Ltd"));
    }
}
