//! Shared fixtures for unit tests.
//!
//! Four generations of Smiths (I1/I2 → I3 → I5 → I7, I8), their in-laws,
//! and two unrelated individuals (I9, I10).

use crate::gedcom::GedcomStore;

pub const SAMPLE_GEDCOM: &str = "\
0 HEAD
1 SOUR TEST
1 GEDC
2 VERS 5.5.1
1 CHAR UTF-8
0 @I1@ INDI
1 NAME John /Smith/
2 GIVN John
2 SURN Smith
1 SEX M
1 BIRT
2 DATE 1 JAN 1900
1 DEAT
2 DATE 15 JUN 1980
1 FAMS @F1@
0 @I2@ INDI
1 NAME Mary /Jones/
1 SEX F
1 BIRT
2 DATE 1905
1 DEAT
2 DATE 1990
1 FAMS @F1@
0 @I3@ INDI
1 NAME Robert /Smith/
1 SEX M
1 BIRT
2 DATE 3 MAR 1925
1 FAMC @F1@
1 FAMS @F2@
0 @I4@ INDI
1 NAME Susan /Brown/
1 SEX F
1 CHR
2 DATE ABT 1927
1 FAMS @F2@
0 @I5@ INDI
1 NAME Michael /Smith/
1 SEX M
1 BIRT
2 DATE 1950
1 FAMC @F2@
1 FAMS @F3@
0 @I6@ INDI
1 NAME Linda /Taylor/
1 SEX F
1 BURI
2 DATE 2020
1 FAMS @F3@
0 @I7@ INDI
1 NAME David /Smith/
1 SEX M
1 BIRT
2 DATE 1975
1 FAMC @F3@
0 @I8@ INDI
1 NAME Emily /Smith/
1 SEX F
1 BIRT
2 DATE 1978
1 FAMC @F3@
0 @I9@ INDI
1 NAME Thomas /Green/ Jr
2 TITL Rev.
1 SEX M
0 @I10@ INDI
1 NAME Alice /White/
1 SEX F
0 @F1@ FAM
1 HUSB @I1@
1 WIFE @I2@
1 CHIL @I3@
1 MARR
2 DATE 1924
0 @F2@ FAM
1 HUSB @I3@
1 WIFE @I4@
1 CHIL @I5@
1 MARR
0 @F3@ FAM
1 HUSB @I5@
1 WIFE @I6@
1 CHIL @I7@
1 CHIL @I8@
0 TRLR
";

pub fn sample_store() -> GedcomStore {
    SAMPLE_GEDCOM.parse().expect("sample GEDCOM parses")
}

/// Parse an ad-hoc GEDCOM snippet
pub fn store_from(content: &str) -> GedcomStore {
    content.parse().expect("test GEDCOM parses")
}
