#![no_main]

use contractor::domain::entities::{ComponentIr, Contract};
use contractor::{ComponentName, Version};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(contract) = toml::from_str::<Contract>(content) else {
        return;
    };
    let (Ok(name), Ok(version)) = (
        ComponentName::new(&contract.name),
        Version::parse(&contract.version),
    ) else {
        return;
    };
    // Validated contracts must always lower to an IR without panicking
    if contract
        .validate(&name, &version, std::path::Path::new("fuzz.toml"))
        .is_ok()
    {
        let _ = ComponentIr::from_contract(name, version, &contract);
    }
});
