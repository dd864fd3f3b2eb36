use crate::{Citation, Family, FunctionalDescriptor, Kind};
use crate::{XC_FLAGS_HAVE_ALL, XC_FLAGS_HAVE_EXC, XC_FLAGS_HAVE_FXC, XC_FLAGS_HAVE_VXC};

const EXC_VXC_FXC: u32 = XC_FLAGS_HAVE_EXC | XC_FLAGS_HAVE_VXC | XC_FLAGS_HAVE_FXC;

// references

const DIRAC: Citation = Citation {
    reference: "P. A. M. Dirac, Math. Proc. Cambridge Philos. Soc. 26, 376 (1930)",
};
const BLOCH: Citation = Citation {
    reference: "F. Bloch, Z. Phys. 57, 545 (1929)",
};
const WIGNER: Citation = Citation {
    reference: "E. P. Wigner, Trans. Faraday Soc. 34, 678 (1938)",
};
const GELL_MANN: Citation = Citation {
    reference: "M. Gell-Mann and K. A. Brueckner, Phys. Rev. 106, 364 (1957)",
};
const HEDIN_LUNDQVIST: Citation = Citation {
    reference: "L. Hedin and B. I. Lundqvist, J. Phys. C: Solid State Phys. 4, 2064 (1971)",
};
const GUNNARSSON_LUNDQVIST: Citation = Citation {
    reference: "O. Gunnarsson and B. I. Lundqvist, Phys. Rev. B 13, 4274 (1976)",
};
const SLATER_XALPHA: Citation = Citation {
    reference: "J. C. Slater, Phys. Rev. 81, 385 (1951)",
};
const VWN: Citation = Citation {
    reference: "S. H. Vosko, L. Wilk, and M. Nusair, Can. J. Phys. 58, 1200 (1980)",
};
const PZ: Citation = Citation {
    reference: "J. P. Perdew and A. Zunger, Phys. Rev. B 23, 5048 (1981)",
};
const ORTIZ_BALLONE: Citation = Citation {
    reference: "G. Ortiz and P. Ballone, Phys. Rev. B 50, 1391 (1994)",
};
const PW92: Citation = Citation {
    reference: "J. P. Perdew and Y. Wang, Phys. Rev. B 45, 13244 (1992)",
};
const VON_BARTH_HEDIN: Citation = Citation {
    reference: "U. von Barth and L. Hedin, J. Phys. C: Solid State Phys. 5, 1629 (1972)",
};
const TETER93: Citation = Citation {
    reference: "S. Goedecker, M. Teter, and J. Hutter, Phys. Rev. B 54, 1703 (1996)",
};
const PBE: Citation = Citation {
    reference: "J. P. Perdew, K. Burke, and M. Ernzerhof, Phys. Rev. Lett. 77, 3865 (1996)",
};
const PBE_ERRATUM: Citation = Citation {
    reference: "J. P. Perdew, K. Burke, and M. Ernzerhof, Phys. Rev. Lett. 78, 1396 (1997)",
};
const REVPBE: Citation = Citation {
    reference: "Y. Zhang and W. Yang, Phys. Rev. Lett. 80, 890 (1998)",
};
const B86: Citation = Citation {
    reference: "A. D. Becke, J. Chem. Phys. 84, 4524 (1986)",
};
const B88: Citation = Citation {
    reference: "A. D. Becke, Phys. Rev. A 38, 3098 (1988)",
};
const PW91: Citation = Citation {
    reference: "J. P. Perdew, J. A. Chevary, S. H. Vosko, K. A. Jackson, M. R. Pederson, D. J. Singh, and C. Fiolhais, Phys. Rev. B 46, 6671 (1992)",
};
const PBESOL: Citation = Citation {
    reference: "J. P. Perdew, A. Ruzsinszky, G. I. Csonka, O. A. Vydrov, G. E. Scuseria, L. A. Constantin, X. Zhou, and K. Burke, Phys. Rev. Lett. 100, 136406 (2008)",
};
const LYP: Citation = Citation {
    reference: "C. Lee, W. Yang, and R. G. Parr, Phys. Rev. B 37, 785 (1988)",
};
const HCTH: Citation = Citation {
    reference: "F. A. Hamprecht, A. J. Cohen, D. J. Tozer, and N. C. Handy, J. Chem. Phys. 109, 6264 (1998)",
};

pub static FUNCTIONALS: &[FunctionalDescriptor] = &[
    // LDA
    FunctionalDescriptor {
        name: "lda_x",
        family: Family::Lda,
        kind: Kind::Exchange,
        library_id: 1,
        flags: XC_FLAGS_HAVE_ALL,
        description: "Slater exchange",
        citations: &[DIRAC, BLOCH],
    },
    FunctionalDescriptor {
        name: "lda_c_wigner",
        family: Family::Lda,
        kind: Kind::Correlation,
        library_id: 2,
        flags: XC_FLAGS_HAVE_ALL,
        description: "Wigner",
        citations: &[WIGNER],
    },
    FunctionalDescriptor {
        name: "lda_c_rpa",
        family: Family::Lda,
        kind: Kind::Correlation,
        library_id: 3,
        flags: XC_FLAGS_HAVE_ALL,
        description: "Random Phase Approximation (RPA)",
        citations: &[GELL_MANN],
    },
    FunctionalDescriptor {
        name: "lda_c_hl",
        family: Family::Lda,
        kind: Kind::Correlation,
        library_id: 4,
        flags: XC_FLAGS_HAVE_ALL,
        description: "Hedin & Lundqvist",
        citations: &[HEDIN_LUNDQVIST],
    },
    FunctionalDescriptor {
        name: "lda_c_gl",
        family: Family::Lda,
        kind: Kind::Correlation,
        library_id: 5,
        flags: XC_FLAGS_HAVE_ALL,
        description: "Gunnarson & Lundqvist",
        citations: &[GUNNARSSON_LUNDQVIST],
    },
    FunctionalDescriptor {
        name: "lda_c_xalpha",
        family: Family::Lda,
        kind: Kind::Correlation,
        library_id: 6,
        flags: XC_FLAGS_HAVE_ALL,
        description: "Slater's Xalpha",
        citations: &[SLATER_XALPHA],
    },
    FunctionalDescriptor {
        name: "lda_c_vwn",
        family: Family::Lda,
        kind: Kind::Correlation,
        library_id: 7,
        flags: XC_FLAGS_HAVE_ALL,
        description: "Vosko, Wilk, & Nusair (VWN5)",
        citations: &[VWN],
    },
    FunctionalDescriptor {
        name: "lda_c_vwn_rpa",
        family: Family::Lda,
        kind: Kind::Correlation,
        library_id: 8,
        flags: XC_FLAGS_HAVE_ALL,
        description: "Vosko, Wilk, & Nusair (VWN5_RPA)",
        citations: &[VWN],
    },
    FunctionalDescriptor {
        name: "lda_c_pz",
        family: Family::Lda,
        kind: Kind::Correlation,
        library_id: 9,
        flags: XC_FLAGS_HAVE_ALL,
        description: "Perdew & Zunger",
        citations: &[PZ],
    },
    FunctionalDescriptor {
        name: "lda_c_pz_mod",
        family: Family::Lda,
        kind: Kind::Correlation,
        library_id: 10,
        flags: XC_FLAGS_HAVE_ALL,
        description: "Perdew & Zunger (Modified)",
        citations: &[PZ],
    },
    FunctionalDescriptor {
        name: "lda_c_ob_pz",
        family: Family::Lda,
        kind: Kind::Correlation,
        library_id: 11,
        flags: XC_FLAGS_HAVE_ALL,
        description: "Ortiz & Ballone (PZ parametrization)",
        citations: &[ORTIZ_BALLONE, PZ],
    },
    FunctionalDescriptor {
        name: "lda_c_pw",
        family: Family::Lda,
        kind: Kind::Correlation,
        library_id: 12,
        flags: XC_FLAGS_HAVE_ALL,
        description: "Perdew & Wang",
        citations: &[PW92],
    },
    FunctionalDescriptor {
        name: "lda_c_pw_mod",
        family: Family::Lda,
        kind: Kind::Correlation,
        library_id: 13,
        flags: XC_FLAGS_HAVE_ALL,
        description: "Perdew & Wang (modified)",
        citations: &[PW92],
    },
    FunctionalDescriptor {
        name: "lda_c_ob_pw",
        family: Family::Lda,
        kind: Kind::Correlation,
        library_id: 14,
        flags: XC_FLAGS_HAVE_ALL,
        description: "Ortiz & Ballone (PW parametrization)",
        citations: &[ORTIZ_BALLONE, PW92],
    },
    FunctionalDescriptor {
        name: "lda_c_vbh",
        family: Family::Lda,
        kind: Kind::Correlation,
        library_id: 17,
        flags: XC_FLAGS_HAVE_ALL,
        description: "von Barth & Hedin",
        citations: &[VON_BARTH_HEDIN],
    },
    FunctionalDescriptor {
        name: "lda_xc_teter93",
        family: Family::Lda,
        kind: Kind::ExchangeCorrelation,
        library_id: 20,
        flags: XC_FLAGS_HAVE_ALL,
        description: "Teter 93",
        citations: &[TETER93],
    },
    // GGA
    FunctionalDescriptor {
        name: "gga_x_pbe",
        family: Family::Gga,
        kind: Kind::Exchange,
        library_id: 101,
        flags: XC_FLAGS_HAVE_ALL,
        description: "Perdew, Burke & Ernzerhof",
        citations: &[PBE, PBE_ERRATUM],
    },
    FunctionalDescriptor {
        name: "gga_x_pbe_r",
        family: Family::Gga,
        kind: Kind::Exchange,
        library_id: 102,
        flags: XC_FLAGS_HAVE_ALL,
        description: "Revised PBE from Zhang & Yang",
        citations: &[REVPBE],
    },
    FunctionalDescriptor {
        name: "gga_x_b86",
        family: Family::Gga,
        kind: Kind::Exchange,
        library_id: 103,
        flags: XC_FLAGS_HAVE_ALL,
        description: "Becke 86",
        citations: &[B86],
    },
    FunctionalDescriptor {
        name: "gga_x_b88",
        family: Family::Gga,
        kind: Kind::Exchange,
        library_id: 106,
        flags: XC_FLAGS_HAVE_ALL,
        description: "Becke 88",
        citations: &[B88],
    },
    FunctionalDescriptor {
        name: "gga_x_pw91",
        family: Family::Gga,
        kind: Kind::Exchange,
        library_id: 109,
        flags: XC_FLAGS_HAVE_ALL,
        description: "Perdew & Wang 91",
        citations: &[PW91],
    },
    FunctionalDescriptor {
        name: "gga_x_pbe_sol",
        family: Family::Gga,
        kind: Kind::Exchange,
        library_id: 116,
        flags: XC_FLAGS_HAVE_ALL,
        description: "Perdew, Burke & Ernzerhof SOL",
        citations: &[PBESOL],
    },
    FunctionalDescriptor {
        name: "gga_c_pbe",
        family: Family::Gga,
        kind: Kind::Correlation,
        library_id: 130,
        flags: XC_FLAGS_HAVE_ALL,
        description: "Perdew, Burke & Ernzerhof",
        citations: &[PBE, PBE_ERRATUM],
    },
    FunctionalDescriptor {
        name: "gga_c_lyp",
        family: Family::Gga,
        kind: Kind::Correlation,
        library_id: 131,
        flags: XC_FLAGS_HAVE_ALL,
        description: "Lee, Yang & Parr",
        citations: &[LYP],
    },
    FunctionalDescriptor {
        name: "gga_c_pbe_sol",
        family: Family::Gga,
        kind: Kind::Correlation,
        library_id: 133,
        flags: XC_FLAGS_HAVE_ALL,
        description: "Perdew, Burke & Ernzerhof SOL",
        citations: &[PBESOL],
    },
    FunctionalDescriptor {
        name: "gga_c_pw91",
        family: Family::Gga,
        kind: Kind::Correlation,
        library_id: 134,
        flags: EXC_VXC_FXC,
        description: "Perdew & Wang 91",
        citations: &[PW91],
    },
    FunctionalDescriptor {
        name: "gga_xc_hcth_93",
        family: Family::Gga,
        kind: Kind::ExchangeCorrelation,
        library_id: 161,
        flags: EXC_VXC_FXC,
        description: "HCTH/93",
        citations: &[HCTH],
    },
];
