//! Department Grouper

use ahash::AHashMap;

use crate::record::Department;
use crate::writer::ShapeHandle;

/// Markers of one department that belong in a single group shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerGroup {
    /// Group shape name, `"<department>_group"`
    pub name: String,
    /// Department shared by every member
    pub department: Department,
    /// Member shapes in placement order
    pub members: Vec<ShapeHandle>,
}

/// Partitions a slide's markers by department
#[derive(Debug, Clone, Copy, Default)]
pub struct DepartmentGrouper;

impl DepartmentGrouper {
    /// Groups for every department with more than one marker
    ///
    /// Groups come out in the order their department first appears;
    /// single-marker departments stay ungrouped.
    pub fn groups(markers: &[(Department, ShapeHandle)]) -> Vec<MarkerGroup> {
        let mut order: Vec<MarkerGroup> = Vec::new();
        let mut index: AHashMap<&Department, usize> = AHashMap::new();

        for (department, shape) in markers {
            match index.get(department) {
                Some(&i) => order[i].members.push(*shape),
                None => {
                    index.insert(department, order.len());
                    order.push(MarkerGroup {
                        name: department.group_name(),
                        department: department.clone(),
                        members: vec![*shape],
                    });
                }
            }
        }

        order.retain(|group| group.members.len() > 1);
        order
    }
}
