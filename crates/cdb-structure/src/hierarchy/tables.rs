//! Compiled-in code tables: dataset codes and FACC letters.

use cdb_registry::{FixedEntry, FixedEnumeration};

pub const GTMODEL_DATASETS: FixedEnumeration = FixedEnumeration::new(
    "GTModel dataset",
    &[
        FixedEntry::number(500, "GTModelGeometry"),
        FixedEntry::number(501, "GTModelTexture"),
        FixedEntry::number(502, "GTModelDescriptor"),
        FixedEntry::number(503, "GTModelMaterial"),
        FixedEntry::number(504, "GTModelCMT"),
        FixedEntry::number(505, "GTModelInteriorGeometry"),
        FixedEntry::number(506, "GTModelInteriorTexture"),
        FixedEntry::number(507, "GTModelInteriorDescriptor"),
        FixedEntry::number(508, "GTModelInteriorMaterial"),
        FixedEntry::number(509, "GTModelInteriorCMT"),
        FixedEntry::number(510, "GTModelSignature"),
        FixedEntry::number(511, "GTModelInteriorSignature"),
    ],
);

pub const MMODEL_DATASETS: FixedEnumeration = FixedEnumeration::new(
    "MModel dataset",
    &[
        FixedEntry::number(600, "MModelGeometry"),
        FixedEntry::number(601, "MModelTexture"),
        FixedEntry::number(602, "MModelDescriptor"),
        FixedEntry::number(603, "MModelMaterial"),
        FixedEntry::number(604, "MModelCMT"),
        FixedEntry::number(605, "MModelInteriorGeometry"),
        FixedEntry::number(606, "MModelInteriorTexture"),
        FixedEntry::number(607, "MModelInteriorDescriptor"),
        FixedEntry::number(608, "MModelInteriorMaterial"),
        FixedEntry::number(609, "MModelInteriorCMT"),
        FixedEntry::number(610, "MModelSignature"),
    ],
);

pub const FACC_CATEGORIES: FixedEnumeration = FixedEnumeration::new(
    "FACC category",
    &[
        FixedEntry::letter('A', "Culture"),
        FixedEntry::letter('B', "Hydrography"),
        FixedEntry::letter('C', "Hypsography"),
        FixedEntry::letter('D', "Physiography"),
        FixedEntry::letter('E', "Vegetation"),
        FixedEntry::letter('F', "Demarcation"),
        FixedEntry::letter('G', "Aeronautical_Information"),
        FixedEntry::letter('I', "Cadastral"),
        FixedEntry::letter('S', "Special_Use"),
    ],
);

/// Subcategory letters, scoped by their category letter.
pub const FACC_SUBCATEGORIES: FixedEnumeration = FixedEnumeration::new(
    "FACC subcategory",
    &[
        FixedEntry::scoped_letter("A", 'A', "Extraction"),
        FixedEntry::scoped_letter("A", 'C', "Processing"),
        FixedEntry::scoped_letter("A", 'D', "Energy_Production"),
        FixedEntry::scoped_letter("A", 'F', "Industry"),
        FixedEntry::scoped_letter("A", 'H', "Commercial"),
        FixedEntry::scoped_letter("A", 'I', "Residential"),
        FixedEntry::scoped_letter("A", 'J', "Agricultural"),
        FixedEntry::scoped_letter("A", 'K', "Recreational"),
        FixedEntry::scoped_letter("A", 'L', "Miscellaneous_Feature"),
        FixedEntry::scoped_letter("A", 'M', "Storage"),
        FixedEntry::scoped_letter("A", 'N', "Rail_Transportation"),
        FixedEntry::scoped_letter("A", 'P', "Road_Transportation"),
        FixedEntry::scoped_letter("A", 'Q', "Transportation_Miscellaneous"),
        FixedEntry::scoped_letter("A", 'T', "Communication"),
        FixedEntry::scoped_letter("B", 'A', "Coastal_Hydrography"),
        FixedEntry::scoped_letter("B", 'B', "Ports_and_Harbors"),
        FixedEntry::scoped_letter("B", 'C', "Aids_to_Navigation"),
        FixedEntry::scoped_letter("B", 'D', "Dangers_and_Hazards"),
        FixedEntry::scoped_letter("B", 'E', "Bottom_Features"),
        FixedEntry::scoped_letter("B", 'H', "Inland_Water"),
        FixedEntry::scoped_letter("B", 'I', "Miscellaneous_Inland_Water"),
        FixedEntry::scoped_letter("B", 'J', "Snow_and_Ice"),
        FixedEntry::scoped_letter("C", 'A', "Relief_Portrayal"),
        FixedEntry::scoped_letter("D", 'B', "Landforms"),
        FixedEntry::scoped_letter("E", 'A', "Cropland"),
        FixedEntry::scoped_letter("E", 'B', "Grassland"),
        FixedEntry::scoped_letter("E", 'C', "Woodland"),
        FixedEntry::scoped_letter("E", 'D', "Wetland"),
        FixedEntry::scoped_letter("F", 'A', "Administrative_Boundaries"),
        FixedEntry::scoped_letter("G", 'B', "Aerodrome"),
    ],
);
