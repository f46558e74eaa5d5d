//! [`MaterialSupply`] of a print job.

use std::collections::BTreeMap;

use common::define_kind;
use serde::{Deserialize, Serialize};

define_kind! {
    #[doc = "Material or operation which may be sourced from a supplier."]
    enum Material {
        #[doc = "Printing plates."]
        Plate = 1,

        #[doc = "Making of a die cutter."]
        DieCutterMaking = 2,

        #[doc = "Die-cutting."]
        DieCutting = 3,

        #[doc = "Laminating."]
        Laminating = 4,

        #[doc = "Cutting."]
        Cutting = 5,

        #[doc = "Binding."]
        Binding = 6,

        #[doc = "Packaging."]
        Packaging = 7,
    }
}

define_text! {
    #[doc = "Name of a shop supplier."]
    SupplierName(max = 256)
}

/// Who supplies a [`Material`].
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "by", content = "name")]
pub enum Supplier {
    /// The customer brings it.
    #[default]
    Customer,

    /// The shop orders it from a supplier.
    ///
    /// The [`SupplierName`] is required on submission.
    Shop(Option<SupplierName>),
}

/// [`Supplier`]s of [`Material`]s of a print job.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MaterialSupply(pub BTreeMap<Material, Supplier>);

impl MaterialSupply {
    /// Sets the [`Supplier`] of the provided [`Material`].
    #[must_use]
    pub fn with(mut self, material: Material, supplier: Supplier) -> Self {
        _ = self.0.insert(material, supplier);
        self
    }

    /// Returns the [`Supplier`] of every [`Material`] in declaration order,
    /// defaulting missing ones to [`Supplier::Customer`].
    pub fn complete(&self) -> impl Iterator<Item = (Material, Supplier)> + '_ {
        Material::all().map(|m| (m, self.0.get(&m).cloned().unwrap_or_default()))
    }
}

#[cfg(test)]
mod spec {
    use super::{Material, MaterialSupply, Supplier, SupplierName};

    #[test]
    fn completes_with_customer_supplier() {
        let shop = Supplier::Shop(SupplierName::new("Plates & Co"));
        let supply = MaterialSupply::default().with(Material::Plate, shop.clone());

        let complete = supply.complete().collect::<Vec<_>>();

        assert_eq!(complete.len(), 7);
        assert_eq!(complete[0], (Material::Plate, shop));
        assert!(complete[1..]
            .iter()
            .all(|(_, s)| *s == Supplier::Customer));
    }

    #[test]
    fn serializes_as_map() {
        let supply = MaterialSupply::default()
            .with(Material::DieCutting, Supplier::Customer)
            .with(
                Material::Packaging,
                Supplier::Shop(SupplierName::new("BoxCo")),
            );

        assert_eq!(
            serde_json::to_string(&supply).unwrap(),
            r#"{"die_cutting":{"by":"customer"},"packaging":{"by":"shop","name":"BoxCo"}}"#,
        );
    }
}
