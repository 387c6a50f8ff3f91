use crate::*;

#[test]
fn table_contains_all_predefined_targets() {
    let table = TargetTable::new();

    for target in PREDEFINED_TARGETS.iter() {
        let found = table.known(&target.name()).unwrap();
        assert_eq!(target, found);
    }

    assert_eq!(PREDEFINED_TARGETS.len() + ZEPHYR_BOARDS.len(), table.len());
}

#[test]
fn zephyr_boards_are_registered_by_full_name() {
    let table = TargetTable::new();

    let target = table.known("zephyr_stm32f4-disco").unwrap();
    assert_eq!(Family::Zephyr, target.family());
    assert_eq!(Architecture::Arm32, target.architecture());
    assert_eq!("zephyr_stm32f4-disco", target.detailed_name());
}

#[test]
fn unknown_target_is_rejected() {
    let table = TargetTable::new();

    let err = table.known("amiga").unwrap_err();
    assert_eq!(TargetSupportError::UnknownTarget("amiga".to_string()), err);
}

#[test]
fn output_file_names_follow_family_conventions() {
    assert_eq!("libfoo.so", CompilerOutputKind::Dynamic.file_name("foo", &Target::Linux));
    assert_eq!("foo.dll", CompilerOutputKind::Dynamic.file_name("foo", &Target::Mingw));
    assert_eq!("libfoo.dylib", CompilerOutputKind::Dynamic.file_name("foo", &Target::Macbook));
    assert_eq!("foo.exe", CompilerOutputKind::Program.file_name("foo", &Target::Mingw));
    assert_eq!("foo.kexe", CompilerOutputKind::Program.file_name("foo", &Target::Linux));
    assert_eq!("foo.wasm", CompilerOutputKind::Program.file_name("foo", &Target::Wasm32));
    assert_eq!("foo.lib", CompilerOutputKind::Library.file_name("foo", &Target::Wasm32));
}

#[test]
fn host_target_suffix_joins_different_targets() {
    assert_eq!("linux", host_target_suffix(&Target::Linux, &Target::Linux));
    assert_eq!("osx-ios", host_target_suffix(&Target::Macbook, &Target::Iphone));
}

#[test]
fn linux_host_enables_embedded_targets() {
    let table = TargetTable::new();
    let enabled = enabled_targets(&Target::Linux, &table).unwrap();

    assert!(enabled.contains(&Target::RaspberryPi));
    assert!(enabled.contains(&Target::zephyr("stm32f4-disco")));
    assert!(!enabled.contains(&Target::Iphone));

    let mingw = enabled_targets(&Target::Mingw, &table).unwrap();
    assert_eq!(vec![Target::Mingw], mingw);

    assert!(enabled_targets(&Target::Wasm32, &table).is_err());
}

#[test]
fn manager_defaults_to_host() {
    let table = TargetTable::new();

    let manager = TargetManager::for_host(&table, Target::Linux, None).unwrap();
    assert_eq!(&Target::Linux, manager.target());

    let manager = TargetManager::for_host(&table, Target::Linux, Some("wasm32")).unwrap();
    assert_eq!(&Target::Wasm32, manager.target());
    assert_eq!("linux-wasm32", manager.host_target_suffix());
    assert!(manager.is_enabled(&Target::Wasm32));

    let lines = manager.list().unwrap();
    assert!(lines.iter().any(|line| line.starts_with("wasm32:") && line.ends_with("(default)")));
}

#[test]
fn host_names() {
    assert_eq!(HostOs::Osx, HostOs::from_os_name("macos").unwrap());
    assert_eq!("macos", HostOs::Osx.simple_name());
    assert!(HostOs::from_os_name("plan9").is_err());

    assert_eq!("x86_64", host_arch_from("amd64").unwrap());
    assert_eq!("arm64", host_arch_from("aarch64").unwrap());

    assert_eq!("darwin-macos", longer_system_name(&Target::Macbook).unwrap());
    assert_eq!("win32", jni_host_platform_include_dir(&Target::Mingw).unwrap());
    assert!(longer_system_name(&Target::Iphone).is_err());
}

#[test]
fn pointer_size_follows_bitness() {
    assert_eq!(8, Target::Linux.pointer_size());
    assert_eq!(4, Target::RaspberryPi.pointer_size());
    assert_eq!(4, Target::Wasm32.object_header_size());
}

#[test]
fn struct_layout_pads_to_alignment() {
    // header ptr, i8, i64, i16
    let layout = Target::Linux.struct_layout(&[Scalar::Ptr, Scalar::I8, Scalar::I64, Scalar::I16]);
    assert_eq!(vec![0, 8, 16, 24], layout.offsets);
    assert_eq!(32, layout.size);
    assert_eq!(8, layout.align);

    let layout = Target::RaspberryPi.struct_layout(&[Scalar::Ptr, Scalar::Bool, Scalar::Ptr]);
    assert_eq!(vec![0, 4, 8], layout.offsets);
    assert_eq!(12, layout.size);
}

#[test]
fn target_specific_records() {
    assert!(Target::Macbook.has_writable_type_info());
    assert!(!Target::Linux.has_writable_type_info());
    assert!(Target::Wasm32.strips_unreferenced_symbols());
    assert!(!Target::Linux.strips_unreferenced_symbols());
}
