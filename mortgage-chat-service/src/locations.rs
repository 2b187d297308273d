/// Service-area locations offered in the property-location step. The flow
/// treats the catalog as opaque; this list is the only place it is defined.
/// Production deployments swap in the full multi-thousand-entry list.
pub const LOCATIONS: &[&str] = &[
    "Toronto",
    "Ottawa",
    "Mississauga",
    "Brampton",
    "Hamilton",
    "London",
    "Markham",
    "Vaughan",
    "Kitchener",
    "Windsor",
    "Richmond Hill",
    "Oakville",
    "Burlington",
    "Oshawa",
    "Barrie",
    "St. Catharines",
    "Guelph",
    "Cambridge",
    "Whitby",
    "Kingston",
    "Ajax",
    "Thunder Bay",
    "Waterloo",
    "Brantford",
    "Pickering",
    "Niagara Falls",
    "Peterborough",
    "Sault Ste. Marie",
    "Greater Sudbury",
    "Newmarket",
];
