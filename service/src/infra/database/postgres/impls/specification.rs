//! [`Database`] implementations storing subsection rows of a [`Job`].
//!
//! [`Job`]: crate::domain::Job

use common::operations::Insert;
use tracerr::Traced;

use crate::{
    domain::job::row,
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Insert<row::Color>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(color): Insert<row::Color>,
    ) -> Result<Self::Ok, Self::Err> {
        let row::Color { job_id, value } = color;
        let (palette, custom) = match value {
            row::ColorValue::Palette(c) => (Some(c), None),
            row::ColorValue::Custom(c) => (None, Some(c)),
        };

        const SQL: &str = "\
            INSERT INTO job_colors (job_id, color, custom_color) \
            VALUES ($1::INT8, $2::INT2, $3::VARCHAR)";
        self.exec(SQL, &[&job_id, &palette, &custom])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Insert<row::PaperItem>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(item): Insert<row::PaperItem>,
    ) -> Result<Self::Ok, Self::Err> {
        let row::PaperItem {
            job_id,
            position,
            paper_type,
            quantity,
            cut_size,
            cut_per_sheet,
        } = item;

        const SQL: &str = "\
            INSERT INTO job_paper_items (\
                job_id, position, paper_type, \
                quantity, cut_size, cut_per_sheet\
            ) \
            VALUES (\
                $1::INT8, $2::INT4, $3::VARCHAR, \
                $4::INT8, $5::VARCHAR, $6::INT8\
            )";
        self.exec(
            SQL,
            &[
                &job_id,
                &position,
                &paper_type,
                &quantity,
                &cut_size,
                &cut_per_sheet,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Insert<row::PrintingMethod>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(method): Insert<row::PrintingMethod>,
    ) -> Result<Self::Ok, Self::Err> {
        let row::PrintingMethod {
            job_id,
            paper_size,
            quantity,
            printing_system,
            impression_first,
            impression_second,
            impression_result,
        } = method;

        const SQL: &str = "\
            INSERT INTO job_printing_methods (\
                job_id, paper_size, quantity, printing_system, \
                impression_first, impression_second, impression_result\
            ) \
            VALUES (\
                $1::INT8, $2::VARCHAR, $3::INT8, $4::VARCHAR, \
                $5::NUMERIC, $6::NUMERIC, $7::NUMERIC\
            )";
        self.exec(
            SQL,
            &[
                &job_id,
                &paper_size,
                &quantity,
                &printing_system,
                &impression_first,
                &impression_second,
                &impression_result,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Insert<row::Laminating>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(laminating): Insert<row::Laminating>,
    ) -> Result<Self::Ok, Self::Err> {
        let row::Laminating {
            job_id,
            kind,
            height,
            width,
            quantity,
            unit_price,
            result,
        } = laminating;

        const SQL: &str = "\
            INSERT INTO job_laminatings (\
                job_id, kind, height, width, quantity, unit_price, result\
            ) \
            VALUES (\
                $1::INT8, $2::INT2, $3::NUMERIC, $4::NUMERIC, \
                $5::INT8, $6::NUMERIC, $7::NUMERIC\
            )";
        self.exec(
            SQL,
            &[
                &job_id,
                &kind,
                &height,
                &width,
                &quantity,
                &unit_price,
                &result,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Insert<row::DieCut>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(die_cut): Insert<row::DieCut>,
    ) -> Result<Self::Ok, Self::Err> {
        let row::DieCut {
            job_id,
            operations,
            impression_first,
            impression_second,
            impression_result,
            manual_result,
        } = die_cut;

        const SQL: &str = "\
            INSERT INTO job_die_cuts (\
                job_id, operations, \
                impression_first, impression_second, impression_result, \
                manual_result\
            ) \
            VALUES (\
                $1::INT8, $2::INT2[], \
                $3::NUMERIC, $4::NUMERIC, $5::NUMERIC, \
                $6::BOOL\
            )";
        self.exec(
            SQL,
            &[
                &job_id,
                &operations,
                &impression_first,
                &impression_second,
                &impression_result,
                &manual_result,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Insert<row::BillBook>> for Postgres<C>
where
    C: Connection,
{
    type Ok = row::BillBookId;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(book): Insert<row::BillBook>,
    ) -> Result<Self::Ok, Self::Err> {
        let row::BillBook {
            job_id,
            number_of_papers,
            bill_numbers,
            book_numbers,
            set_count,
            quantity,
            unit_price,
            result,
            gathering,
            binding,
        } = book;

        const SQL: &str = "\
            INSERT INTO job_bill_books (\
                job_id, number_of_papers, bill_numbers, book_numbers, \
                set_count, quantity, unit_price, result, \
                gathering, binding\
            ) \
            VALUES (\
                $1::INT8, $2::INT8, $3::VARCHAR, $4::VARCHAR, \
                $5::INT8, $6::INT8, $7::NUMERIC, $8::NUMERIC, \
                $9::BOOL, $10::INT2\
            ) \
            RETURNING id";
        self.query_opt(
            SQL,
            &[
                &job_id,
                &number_of_papers,
                &bill_numbers,
                &book_numbers,
                &set_count,
                &quantity,
                &unit_price,
                &result,
                &gathering,
                &binding,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(|row| row.expect("always returned").get("id"))
    }
}

impl<C> Database<Insert<row::BillBookPaper>> for Postgres<C>
where
    C: Connection,
{
    type Ok = row::BillBookPaperId;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(paper): Insert<row::BillBookPaper>,
    ) -> Result<Self::Ok, Self::Err> {
        let row::BillBookPaper {
            bill_book_id,
            position,
            paper_type,
        } = paper;

        const SQL: &str = "\
            INSERT INTO job_bill_book_papers (\
                bill_book_id, position, paper_type\
            ) \
            VALUES ($1::INT8, $2::INT4, $3::VARCHAR) \
            RETURNING id";
        self.query_opt(SQL, &[&bill_book_id, &position, &paper_type])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.expect("always returned").get("id"))
    }
}

impl<C> Database<Insert<row::BillBookPaperColor>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(color): Insert<row::BillBookPaperColor>,
    ) -> Result<Self::Ok, Self::Err> {
        let row::BillBookPaperColor { paper_id, color } = color;

        const SQL: &str = "\
            INSERT INTO job_bill_book_paper_colors (paper_id, color) \
            VALUES ($1::INT8, $2::INT2)";
        self.exec(SQL, &[&paper_id, &color])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Insert<row::MaterialSupply>> for Postgres<C>
where
    C: Connection,
{
    type Ok = row::MaterialSupplyId;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(supply): Insert<row::MaterialSupply>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            INSERT INTO job_material_supplies (job_id) \
            VALUES ($1::INT8) \
            RETURNING id";
        self.query_opt(SQL, &[&supply.job_id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.expect("always returned").get("id"))
    }
}

impl<C> Database<Insert<row::MaterialSupplyItem>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(item): Insert<row::MaterialSupplyItem>,
    ) -> Result<Self::Ok, Self::Err> {
        let row::MaterialSupplyItem {
            material_supply_id,
            material,
            supplied_by_shop,
            supplier_name,
        } = item;

        const SQL: &str = "\
            INSERT INTO job_material_supply_items (\
                material_supply_id, material, supplied_by_shop, supplier_name\
            ) \
            VALUES ($1::INT8, $2::INT2, $3::BOOL, $4::VARCHAR)";
        self.exec(
            SQL,
            &[
                &material_supply_id,
                &material,
                &supplied_by_shop,
                &supplier_name,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
